//! Scripted runs of [`DynamicArray`] used by the `dynvec` binary.
//!
//! Each scenario records every capacity change it causes and returns a
//! [`ScenarioReport`], so callers can print or assert on the outcome.

use anyhow::{Context, Result, bail, ensure};
use dyn_array::{DynamicArray, Error};
use tracing::info;

use crate::cli::Command;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    pub size: usize,
    pub capacity: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resize {
    Grew { from: usize, to: usize, size: usize },
    Shrank { from: usize, to: usize, size: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioReport {
    pub name: &'static str,
    pub initial: Snapshot,
    pub resizes: Vec<Resize>,
    pub contents: Vec<i64>,
    pub last: Snapshot,
}

/// Wraps the array under test and notes each resize as it happens.
struct Recorder {
    array: DynamicArray<i64>,
    initial: Snapshot,
    resizes: Vec<Resize>,
}

impl Recorder {
    fn new(initial_capacity: usize) -> Self {
        let array = DynamicArray::with_capacity(initial_capacity);
        let initial = snapshot(&array);
        Self {
            array,
            initial,
            resizes: Vec::new(),
        }
    }

    fn push(&mut self, value: i64) {
        let before = self.array.capacity();
        self.array.push_back(value);
        self.note(before);
    }

    fn pop(&mut self) -> Result<i64, Error> {
        let before = self.array.capacity();
        let value = self.array.pop_back()?;
        self.note(before);
        Ok(value)
    }

    fn note(&mut self, before: usize) {
        let after = self.array.capacity();
        let size = self.array.size();
        if after > before {
            info!(from = before, to = after, size, "array grew");
            self.resizes.push(Resize::Grew { from: before, to: after, size });
        } else if after < before {
            info!(from = before, to = after, size, "array shrank");
            self.resizes.push(Resize::Shrank { from: before, to: after, size });
        }
    }

    fn finish(self, name: &'static str) -> ScenarioReport {
        ScenarioReport {
            name,
            initial: self.initial,
            last: snapshot(&self.array),
            contents: self.array.iter().copied().collect(),
            resizes: self.resizes,
        }
    }
}

fn snapshot(array: &DynamicArray<i64>) -> Snapshot {
    Snapshot {
        size: array.size(),
        capacity: array.capacity(),
    }
}

pub fn run(command: Command, initial_capacity: usize) -> Result<ScenarioReport> {
    match command {
        Command::Basic => basic(initial_capacity),
        Command::Fill { count } => fill(initial_capacity, count),
        Command::Drain { count } => drain(initial_capacity, count),
    }
}

/// Push 5, push 6, pop once.
pub fn basic(initial_capacity: usize) -> Result<ScenarioReport> {
    let mut rec = Recorder::new(initial_capacity);
    rec.push(5);
    rec.push(6);
    let popped = rec.pop().context("pop after two pushes")?;
    ensure!(popped == 6, "expected to pop 6, got {popped}");
    Ok(rec.finish("basic"))
}

/// Push `0..count`, then read every slot back by index.
pub fn fill(initial_capacity: usize, count: usize) -> Result<ScenarioReport> {
    let mut rec = Recorder::new(initial_capacity);
    for value in 0..count {
        rec.push(value as i64);
    }
    for index in 0..count {
        let value = *rec.array.at(index)?;
        ensure!(value == index as i64, "slot {index} holds {value}");
    }
    Ok(rec.finish("fill"))
}

/// Push `0..count`, pop until empty checking LIFO order, then make sure one
/// more pop is refused.
pub fn drain(initial_capacity: usize, count: usize) -> Result<ScenarioReport> {
    let mut rec = Recorder::new(initial_capacity);
    for value in 0..count {
        rec.push(value as i64);
    }
    for expected in (0..count).rev() {
        let value = rec.pop().with_context(|| format!("pop expecting {expected}"))?;
        ensure!(value == expected as i64, "popped {value}, expected {expected}");
    }
    match rec.pop() {
        Err(Error::Empty) => {}
        Ok(value) => bail!("pop on an empty array returned {value}"),
        Err(err) => bail!("pop on an empty array failed unexpectedly: {err}"),
    }
    Ok(rec.finish("drain"))
}
