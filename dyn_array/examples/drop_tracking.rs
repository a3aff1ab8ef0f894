use dyn_array::DynamicArray;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

struct Tracked(usize, Arc<AtomicUsize>);

impl Drop for Tracked {
    fn drop(&mut self) {
        println!("Dropping element {}", self.0);
        self.1.fetch_add(1, Ordering::SeqCst);
    }
}

fn main() {
    println!("--- Relocation & Drop Example ---");
    let drop_count = Arc::new(AtomicUsize::new(0));

    {
        let mut arr = DynamicArray::with_capacity(2);
        for i in 0..5 {
            arr.push_back(Tracked(i, drop_count.clone()));
        }
        println!("Array grew to capacity {} without dropping anything.", arr.capacity());
        assert_eq!(drop_count.load(Ordering::SeqCst), 0);

        if let Ok(last) = arr.pop_back() {
            println!("Popped element {}, the caller now owns it.", last.0);
        }
        println!("Array holds {} elements at capacity {}.", arr.size(), arr.capacity());
    }

    println!("Total elements dropped: {}", drop_count.load(Ordering::SeqCst));
    assert_eq!(drop_count.load(Ordering::SeqCst), 5);
}
