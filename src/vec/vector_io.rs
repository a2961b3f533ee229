#![cfg(feature = "std")]

use crate::vec::Vector;

use std::io::*;



impl Write for Vector<u8> {
    fn flush(&mut self) -> Result<()> { Ok(()) }
    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        self.try_reserve_additional(buf.len())?;
        self.extend_from_slice(buf);
        Ok(buf.len())
    }
}



#[test] fn write() {
    let mut v = Vector::<u8>::new();
    write!(v, "{}-{}", 12, "ab").unwrap();
    v.write_all(b"!").unwrap();
    assert_eq!(v, *b"12-ab!");
}
