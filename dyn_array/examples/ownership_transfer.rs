use dyn_array::DynamicArray;
use std::thread;

/// Pushes `values`, returning every (old, new) capacity seen on the way.
fn grow(arr: &mut DynamicArray<u32>, values: std::ops::Range<u32>) -> Vec<(usize, usize)> {
    let mut changes = Vec::new();
    for value in values {
        let before = arr.capacity();
        arr.push_back(value);
        if arr.capacity() != before {
            changes.push((before, arr.capacity()));
        }
    }
    changes
}

fn main() {
    println!("--- Grow in a worker, drain on main ---");
    let mut arr = DynamicArray::with_capacity(2);
    arr.push_back(0);
    arr.push_back(1);
    println!("main: size {}, cap {} (full)", arr.size(), arr.capacity());

    // The block moves with the array; the worker owns it until join.
    let worker = thread::spawn(move || {
        let changes = grow(&mut arr, 2..10);
        for (from, to) in &changes {
            println!("worker: grew {from} -> {to}");
        }
        (arr, changes)
    });

    let (mut arr, grown) = match worker.join() {
        Ok(result) => result,
        Err(_) => {
            eprintln!("worker thread panicked");
            return;
        }
    };
    assert_eq!(grown, vec![(2, 4), (4, 8), (8, 16)]);
    assert_eq!(arr.as_slice(), &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);

    let mut shrunk = Vec::new();
    let mut expected = 10;
    while let Ok(value) = arr.pop_back() {
        expected -= 1;
        assert_eq!(value, expected);
        let cap = arr.capacity();
        let from = shrunk.last().map_or(16, |&(_, to, _)| to);
        if from != cap {
            println!("main: shrank {from} -> {cap} at size {}", arr.size());
            shrunk.push((from, cap, arr.size()));
        }
    }
    assert_eq!(shrunk, vec![(16, 8, 7), (8, 4, 3), (4, 2, 1), (2, 1, 0)]);
    println!("main: drained, cap {}", arr.capacity());
}
