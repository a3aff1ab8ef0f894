use super::*;
use crossbeam::scope;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;


struct Droppable(Arc<AtomicUsize>);

impl Drop for Droppable {
    fn drop(&mut self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

#[test]
fn test_new_is_empty_with_default_capacity() {
    let v: DynamicArray<i32> = DynamicArray::new();
    assert_eq!(v.size(), 0);
    assert_eq!(v.capacity(), DEFAULT_CAPACITY);
    assert!(v.empty());
    assert_eq!(v.at(0), Err(Error::OutOfRange { index: 0, len: 0 }));
    assert_eq!(v.at(1), Err(Error::OutOfRange { index: 1, len: 0 }));
}

#[test]
fn test_basic_push_pop() {
    let mut v = DynamicArray::new();
    v.push_back(1);
    v.push_back(2);
    v.push_back(3);
    assert_eq!(v.size(), 3);
    assert_eq!(v[0], 1);
    assert_eq!(v[1], 2);
    assert_eq!(v[2], 3);
    assert_eq!(v.pop_back(), Ok(3));
    assert_eq!(v.pop_back(), Ok(2));
    assert_eq!(v.pop_back(), Ok(1));
    assert_eq!(v.pop_back(), Err(Error::Empty));
}

#[test]
fn test_push_push_pop_leaves_first() {
    let mut v = DynamicArray::new();
    assert_eq!((v.size(), v.capacity()), (0, 20));
    v.push_back(5);
    v.push_back(6);
    v.pop_back().unwrap();

    let seen: Vec<i32> = v.iter().copied().collect();
    assert_eq!(seen, vec![5]);
    assert_eq!(v.size(), 1);
    // 1 < 20 / 2, so the pop halved the block
    assert_eq!(v.capacity(), 10);
}

#[test]
fn test_grow_doubles_when_full() {
    let mut v = DynamicArray::new();
    for i in 0..20 {
        v.push_back(i);
    }
    assert_eq!(v.capacity(), 20);
    v.push_back(20);
    assert_eq!(v.capacity(), 40);
    assert_eq!(v.size(), 21);
    for i in 0..21 {
        assert_eq!(v.at(i), Ok(&(i as i32)));
    }
}

#[test]
fn test_shrink_halves_below_half_full() {
    let mut v: DynamicArray<u8> = DynamicArray::with_capacity(8);
    for i in 0..5 {
        v.push_back(i);
    }
    v.pop_back().unwrap();
    // len 4 is not below 8 / 2
    assert_eq!(v.capacity(), 8);
    v.pop_back().unwrap();
    assert_eq!(v.capacity(), 4);
    assert_eq!(v.as_slice(), &[0, 1, 2]);
}

#[test]
fn test_drain_to_empty_never_reaches_zero_capacity() {
    let mut v = DynamicArray::new();
    for i in 0..64 {
        v.push_back(i);
    }
    assert_eq!(v.capacity(), 80);
    let mut expected = 63;
    while let Ok(value) = v.pop_back() {
        assert_eq!(value, expected);
        assert!(v.capacity() >= v.size());
        expected -= 1;
    }
    assert!(v.empty());
    assert_eq!(v.capacity(), 1);
}

#[test]
fn test_pop_on_empty_leaves_array_untouched() {
    let mut v: DynamicArray<String> = DynamicArray::with_capacity(3);
    assert_eq!(v.pop_back(), Err(Error::Empty));
    assert_eq!(v.size(), 0);
    assert_eq!(v.capacity(), 3);
}

#[test]
fn test_zero_capacity_grows_to_one() {
    let mut v = DynamicArray::with_capacity(0);
    assert_eq!(v.capacity(), 0);
    v.push_back('a');
    assert_eq!(v.capacity(), 1);
    v.push_back('b');
    assert_eq!(v.capacity(), 2);
    v.push_back('c');
    assert_eq!(v.capacity(), 4);
    assert_eq!(v.as_slice(), &['a', 'b', 'c']);
}

#[test]
fn test_out_of_range_reports_index_and_len() {
    let mut v = DynamicArray::new();
    v.push_back(10);
    v.push_back(20);
    assert_eq!(v.at(2), Err(Error::OutOfRange { index: 2, len: 2 }));
    assert_eq!(v.at(usize::MAX), Err(Error::OutOfRange { index: usize::MAX, len: 2 }));
    assert!(v.at_mut(2).is_err());
    assert_eq!(
        Error::OutOfRange { index: 2, len: 2 }.to_string(),
        "index 2 is out of range for length 2"
    );
}

#[test]
#[should_panic(expected = "index 0 is out of range for length 0")]
fn test_index_operator_panics_on_empty() {
    let v: DynamicArray<i32> = DynamicArray::new();
    let _ = v[0];
}

#[test]
#[should_panic(expected = "index 3 is out of range for length 3")]
fn test_index_mut_operator_panics_past_end() {
    let mut v: DynamicArray<i32> = (0..3).collect();
    v[3] = 7;
}

#[test]
fn test_write_survives_relocation() {
    let mut v = DynamicArray::new();
    for i in 0..20 {
        v.push_back(i);
    }
    *v.at_mut(7).unwrap() = 700;
    v[19] = 1900;
    // forces a grow, then a run of shrinks
    v.push_back(20);
    for _ in 0..13 {
        v.pop_back().unwrap();
    }
    assert_eq!(v.capacity(), 10);
    assert_eq!(v.as_slice(), &[0, 1, 2, 3, 4, 5, 6, 700]);
}

#[test]
fn test_raii_drop() {
    let counter = Arc::new(AtomicUsize::new(0));

    {
        let mut v = DynamicArray::new();
        for _ in 0..50 {
            v.push_back(Droppable(counter.clone()));
        }
        // relocations must move, not drop
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }
    assert_eq!(counter.load(Ordering::SeqCst), 50);
}

#[test]
fn test_pop_hands_element_to_caller() {
    let counter = Arc::new(AtomicUsize::new(0));
    let mut v = DynamicArray::new();
    for _ in 0..30 {
        v.push_back(Droppable(counter.clone()));
    }

    let popped: Vec<Droppable> = (0..25).map(|_| v.pop_back().unwrap()).collect();
    assert_eq!(counter.load(Ordering::SeqCst), 0);
    drop(popped);
    assert_eq!(counter.load(Ordering::SeqCst), 25);
    drop(v);
    assert_eq!(counter.load(Ordering::SeqCst), 30);
}

#[test]
fn test_try_push_back() {
    let mut v = DynamicArray::with_capacity(1);
    assert!(v.try_push_back(1u64).is_ok());
    assert!(v.try_push_back(2u64).is_ok());
    assert_eq!(v.capacity(), 2);
    assert_eq!(v.as_slice(), &[1, 2]);
}

#[test]
fn test_push_error_display_and_into_value() {
    let err = PushError {
        error: AllocError::CapacityOverflow,
        value: "kept".to_string(),
    };
    assert_eq!(err.to_string(), "could not append: capacity overflow");
    assert_eq!(err.into_value(), "kept");
}

#[test]
fn test_zero_sized_elements() {
    let mut v = DynamicArray::new();
    for _ in 0..100 {
        v.push_back(());
    }
    assert_eq!(v.size(), 100);
    assert_eq!(v.capacity(), 160);
    for _ in 0..100 {
        assert_eq!(v.pop_back(), Ok(()));
    }
    assert!(v.empty());
}

#[test]
fn test_iterators() {
    let mut v = DynamicArray::new();
    v.push_back(10);
    v.push_back(20);
    v.push_back(30);

    let mut sum = 0;
    for &x in &v {
        sum += x;
    }
    assert_eq!(sum, 60);

    for x in &mut v {
        *x += 1;
    }
    assert_eq!(v[0], 11);

    let collected: Vec<i32> = v.into_iter().collect();
    assert_eq!(collected, vec![11, 21, 31]);
}

#[test]
fn test_into_iter_both_ends() {
    let v: DynamicArray<i32> = (1..=5).collect();
    let mut it = v.into_iter();
    assert_eq!(it.len(), 5);
    assert_eq!(it.next(), Some(1));
    assert_eq!(it.next_back(), Some(5));
    assert_eq!(it.as_slice(), &[2, 3, 4]);
    assert_eq!(it.len(), 3);
    let rest: Vec<i32> = it.rev().collect();
    assert_eq!(rest, vec![4, 3, 2]);
}

#[test]
fn test_into_iter_drops_unconsumed() {
    let counter = Arc::new(AtomicUsize::new(0));
    let mut v = DynamicArray::new();
    for _ in 0..10 {
        v.push_back(Droppable(counter.clone()));
    }

    let mut it = v.into_iter();
    drop(it.next());
    drop(it.next_back());
    assert_eq!(counter.load(Ordering::SeqCst), 2);
    drop(it);
    assert_eq!(counter.load(Ordering::SeqCst), 10);
}

#[test]
fn test_clone_eq_and_debug() {
    let mut v = DynamicArray::with_capacity(4);
    v.extend(["a".to_string(), "b".to_string()]);
    let copy = v.clone();
    assert_eq!(copy, v);
    assert_eq!(copy.capacity(), 4);
    assert_eq!(format!("{copy:?}"), r#"["a", "b"]"#);

    v.pop_back().unwrap();
    assert_ne!(copy, v);
}

#[test]
fn test_from_iter_applies_growth_policy() {
    let v: DynamicArray<usize> = (0..41).collect();
    assert_eq!(v.size(), 41);
    assert_eq!(v.capacity(), 80);
    assert_eq!(v.first(), Some(&0));
    assert_eq!(v.last(), Some(&40));
}

#[test]
fn test_concurrency() {
    let mut v = DynamicArray::new();
    for i in 0..100 {
        v.push_back(i);
    }

    scope(|s| {
        s.spawn(|_| {
            let total: i32 = v.iter().sum();
            assert_eq!(total, 4950);
        });
        s.spawn(|_| {
            assert_eq!(v.iter().filter(|x| **x % 2 == 0).count(), 50);
        });
    })
    .unwrap();
}

#[test]
fn test_grow_in_worker_then_shrink_on_owner() {
    let mut v = DynamicArray::with_capacity(2);
    v.push_back(0u32);
    v.push_back(1);

    let handle = thread::spawn(move || {
        let mut caps = Vec::new();
        for i in 2..10 {
            v.push_back(i);
            caps.push(v.capacity());
        }
        (v, caps)
    });
    let (mut v, caps) = handle.join().unwrap();
    assert_eq!(caps, vec![4, 4, 8, 8, 8, 8, 16, 16]);
    assert_eq!(v.as_slice(), &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);

    let mut caps = Vec::new();
    while v.pop_back().is_ok() {
        caps.push(v.capacity());
    }
    // sizes 9..=0 after each pop
    assert_eq!(caps, vec![16, 16, 8, 8, 8, 8, 4, 4, 2, 1]);
}
