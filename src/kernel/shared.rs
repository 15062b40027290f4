/*!
 * Shared Kernel Handle
 * Serializes callers behind one exclusive section
 */

use super::{Kernel, KernelStatus};
use parking_lot::Mutex;
use std::sync::Arc;

/// Cloneable handle to a single kernel
///
/// Every call holds the lock for exactly one operation, so operations stay
/// atomic with respect to each other.
#[derive(Clone, Default)]
pub struct SharedKernel {
    inner: Arc<Mutex<Kernel>>,
}

impl SharedKernel {
    pub fn new(kernel: Kernel) -> Self {
        Self {
            inner: Arc::new(Mutex::new(kernel)),
        }
    }

    /// Run one operation with exclusive access
    pub fn with<R>(&self, f: impl FnOnce(&mut Kernel) -> R) -> R {
        let mut kernel = self.inner.lock();
        f(&mut kernel)
    }

    pub fn running_name(&self) -> String {
        self.inner.lock().running_name().to_string()
    }

    pub fn status(&self) -> KernelStatus {
        self.inner.lock().status()
    }
}
