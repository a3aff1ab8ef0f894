use dyn_array::DynamicArray;

fn main() {
    println!("--- Basic Usage Example ---");
    let mut arr = DynamicArray::new();

    for i in 1..=25 {
        arr.push_back(i * 10);
        println!("Pushed: {}, size: {}, cap: {}", i * 10, arr.size(), arr.capacity());
    }

    println!("Elements: {:?}", arr.as_slice());
    println!("arr.at(3) = {:?}", arr.at(3));
    println!("arr.at(99) = {:?}", arr.at(99));

    while let Ok(val) = arr.pop_back() {
        println!("Popped: {}, size: {}, cap: {}", val, arr.size(), arr.capacity());
    }
    println!("pop_back on empty: {:?}", arr.pop_back());
}
