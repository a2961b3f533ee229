use crate::vec::Vector;

use core::fmt::{self, Debug, Formatter};



impl<T: Debug> Debug for Vector<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vector")
            .field("capacity", &self.capacity())
            .field("data", &self.as_slice())
        .finish()
    }
}



#[test] fn debug() {
    let mut v = Vector::<u8>::with_capacity(4);
    v.extend([1, 2]);
    assert_eq!(std::format!("{v:?}"), "Vector { capacity: 4, data: [1, 2] }");
}
