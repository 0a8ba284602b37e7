// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use parking_lot::Mutex;
use settle_core::Result;
use std::sync::Arc;

/// Records every value a storage listener is called with.
///
/// # Example
///
/// ```rust
/// use settle_test_utils::ListenerRecorder;
///
/// let recorder = ListenerRecorder::<u32>::new();
/// let listener = recorder.listener();
/// listener(Some(&1)).unwrap();
/// listener(None).unwrap();
/// assert_eq!(recorder.values(), vec![Some(1), None]);
/// ```
#[derive(Debug)]
pub struct ListenerRecorder<T> {
    values: Arc<Mutex<Vec<Option<T>>>>,
}

impl<T: Clone + Send + 'static> ListenerRecorder<T> {
    pub fn new() -> Self {
        Self {
            values: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A listener closure appending to this recorder.
    pub fn listener(&self) -> impl Fn(Option<&T>) -> Result<()> + Send + Sync + 'static {
        let values = Arc::clone(&self.values);
        move |value: Option<&T>| {
            values.lock().push(value.cloned());
            Ok(())
        }
    }

    pub fn values(&self) -> Vec<Option<T>> {
        self.values.lock().clone()
    }

    pub fn count(&self) -> usize {
        self.values.lock().len()
    }

    pub fn last(&self) -> Option<Option<T>> {
        self.values.lock().last().cloned()
    }
}

impl<T: Clone + Send + 'static> Default for ListenerRecorder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for ListenerRecorder<T> {
    fn clone(&self) -> Self {
        Self {
            values: Arc::clone(&self.values),
        }
    }
}
