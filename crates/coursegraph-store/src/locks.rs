//! Per-course write serialization.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

type LockMap = HashMap<String, Arc<AsyncMutex<()>>>;

/// One async mutex per course id.
///
/// Every read-modify-write of a course document holds its course's guard,
/// so two mutations of the same course cannot overwrite each other.
/// Different courses never contend. A course's entry lives only while a
/// guard holds it or a task waits on it.
#[derive(Debug, Default)]
pub struct CourseLocks {
    locks: Mutex<LockMap>,
}

impl CourseLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to a course.
    pub async fn lock(&self, course_id: &str) -> CourseGuard<'_> {
        let lock = Arc::clone(self.map().entry(course_id.to_string()).or_default());
        CourseGuard {
            locks: self,
            course_id: course_id.to_string(),
            guard: Some(lock.lock_owned().await),
        }
    }

    /// Number of courses currently locked or waited on.
    pub fn len(&self) -> usize {
        self.map().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn map(&self) -> MutexGuard<'_, LockMap> {
        self.locks.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Exclusive access to one course, released on drop.
#[derive(Debug)]
pub struct CourseGuard<'a> {
    locks: &'a CourseLocks,
    course_id: String,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for CourseGuard<'_> {
    fn drop(&mut self) {
        drop(self.guard.take());

        // Waiters clone the mutex under the map lock, so a count of one
        // means nobody else can reach this entry.
        let mut locks = self.locks.map();
        if locks
            .get(&self.course_id)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            locks.remove(&self.course_id);
        }
    }
}
