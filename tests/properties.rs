use ivector::{relocate_by_copy, relocate_by_move, Relocate, Vector};
use proptest::prelude::*;

use std::cell::Cell;
use std::rc::Rc;



/// Counts live instances through a shared counter.
#[derive(Debug)] struct Counted { value: u16, live: Rc<Cell<isize>> }

impl Counted {
    fn new(value: u16, live: &Rc<Cell<isize>>) -> Self { live.set(live.get() + 1); Self { value, live: live.clone() } }
}

impl Drop for Counted { fn drop(&mut self) { self.live.set(self.live.get() - 1); assert!(self.live.get() >= 0, "dropped twice") } }

relocate_by_move!(Counted);

#[derive(Clone, Debug)] struct Copied(u16);
relocate_by_copy!(Copied);

#[derive(Clone, Debug)] enum Op { Push(u16), Pop, Insert(usize, u16), Erase(usize), Resize(usize), Reserve(usize) }

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        any::<u16>().prop_map(Op::Push),
        Just(Op::Pop),
        (any::<usize>(), any::<u16>()).prop_map(|(i, v)| Op::Insert(i, v)),
        any::<usize>().prop_map(Op::Erase),
        (0usize .. 40).prop_map(Op::Resize),
        (0usize .. 64).prop_map(Op::Reserve),
    ]
}

/// Apply `op` to both a [`Vector`] and a model of its values.
fn apply<T: Relocate>(v: &mut Vector<T>, model: &mut Vec<u16>, op: &Op, make: impl Fn(u16) -> T) {
    match *op {
        Op::Push(x)         => { v.push(make(x)); model.push(x); },
        Op::Pop             => { if !model.is_empty() { v.pop_back(); model.pop(); } },
        Op::Insert(i, x)    => { let i = i % (model.len() + 1); assert_eq!(v.insert(i, make(x)), i); model.insert(i, x); },
        Op::Erase(i)        => { if !model.is_empty() { let i = i % model.len(); assert_eq!(v.erase(i), i); model.remove(i); } },
        Op::Resize(n)       => { v.resize_with(n, || make(0)); model.resize(n, 0); },
        Op::Reserve(n)      => { let before = v.capacity(); v.reserve(n); assert_eq!(v.capacity(), before.max(n)); },
    }
}

proptest! {
    #[test]
    fn pushes_keep_order(values in proptest::collection::vec(any::<i64>(), 0 .. 200)) {
        let mut v = Vector::new();
        for &x in &values { v.push(x) }
        prop_assert_eq!(v.len(), values.len());
        prop_assert_eq!(v.as_slice(), &values[..]);
    }

    #[test]
    fn unrequested_growth_doubles(n in 0usize .. 300) {
        let mut v = Vector::<u8>::new();
        for _ in 0 .. n {
            let (len, before) = (v.len(), v.capacity());
            v.push(0);
            if len < before { prop_assert_eq!(v.capacity(), before) }
            else            { prop_assert_eq!(v.capacity(), 1.max(2 * before)) }
        }
    }

    #[test]
    fn matches_model(ops in proptest::collection::vec(arb_op(), 0 .. 100)) {
        let live = Rc::new(Cell::new(0));
        {
            let mut v = Vector::<Counted>::new();
            let mut model = Vec::<u16>::new();
            let mut last_capacity = 0;
            for op in &ops {
                apply(&mut v, &mut model, op, |x| Counted::new(x, &live));
                prop_assert!(v.iter().map(|c| c.value).eq(model.iter().copied()));
                prop_assert!(v.capacity() >= last_capacity);
                prop_assert_eq!(live.get(), v.len() as isize);
                last_capacity = v.capacity();
            }
        }
        prop_assert_eq!(live.get(), 0);
    }

    #[test]
    fn matches_model_copy_policy(ops in proptest::collection::vec(arb_op(), 0 .. 100)) {
        let mut v = Vector::<Copied>::new();
        let mut model = Vec::<u16>::new();
        for op in &ops {
            apply(&mut v, &mut model, op, Copied);
            prop_assert!(v.iter().map(|c| c.0).eq(model.iter().copied()));
        }
    }

    #[test]
    fn insert_then_erase_restores(values in proptest::collection::vec(any::<u32>(), 0 .. 50), pos in any::<usize>(), x in any::<u32>()) {
        let mut v : Vector<u32> = values.iter().copied().collect();
        let capacity = v.capacity();
        let pos = pos % (v.len() + 1);
        v.insert(pos, x);
        v.erase(pos);
        prop_assert_eq!(v.as_slice(), &values[..]);
        prop_assert!(v.capacity() >= capacity);
    }

    #[test]
    fn copies_are_independent(values in proptest::collection::vec(any::<u8>(), 1 .. 50), extra in any::<u8>()) {
        let original : Vector<u8> = values.iter().copied().collect();
        let mut copy = original.clone();
        copy.push(extra);
        copy[0] = copy[0].wrapping_add(1);
        prop_assert_eq!(original.as_slice(), &values[..]);

        let mut assigned = Vector::from([9u8; 3]);
        assigned.clone_from(&original);
        prop_assert_eq!(&assigned, &original);
        assigned.erase(0);
        prop_assert_eq!(original.as_slice(), &values[..]);
    }

    #[test]
    fn moves_transfer_exactly(values in proptest::collection::vec(any::<u16>(), 0 .. 50)) {
        let live = Rc::new(Cell::new(0));
        {
            let mut source : Vector<Counted> = values.iter().map(|&x| Counted::new(x, &live)).collect();
            let moved = source.take();
            prop_assert!(source.is_empty());
            prop_assert!(moved.iter().map(|c| c.value).eq(values.iter().copied()));

            let mut assigned = Vector::from([Counted::new(1, &live)]);
            let mut other = moved;
            assigned.swap(&mut other);
            prop_assert!(assigned.iter().map(|c| c.value).eq(values.iter().copied()));
            prop_assert!(other.iter().map(|c| c.value).eq([1]));
            prop_assert_eq!(live.get(), values.len() as isize + 1);
        }
        prop_assert_eq!(live.get(), 0);
    }
}
