use std::ffi::CStr;
use std::ffi::c_void;
use std::ptr::NonNull;
use std::sync::OnceLock;

use tracing::debug;
use tracing::warn;

/// An optional platform capability bound by symbol name on first use.
///
/// The lookup runs at most once per probe; its outcome, including absence, is
/// cached for the rest of the process. Meant to live in a `static`.
pub struct SymbolProbe<F> {
    name: &'static CStr,
    resolved: OnceLock<Option<F>>,
}

impl<F: Copy> SymbolProbe<F> {
    pub const fn new(name: &'static CStr) -> Self {
        Self {
            name,
            resolved: OnceLock::new(),
        }
    }

    pub fn name(&self) -> &'static CStr {
        self.name
    }

    /// Return the cached capability, running `lookup` if this is the first call.
    pub fn get_or_resolve(&self, lookup: impl FnOnce(&CStr) -> Option<F>) -> Option<F> {
        *self.resolved.get_or_init(|| {
            let resolved = lookup(self.name);
            match resolved {
                Some(_) => debug!(symbol = ?self.name, "resolved platform symbol"),
                None => warn!(symbol = ?self.name, "Failed to resolve platform symbol"),
            }
            resolved
        })
    }
}

/// `dlsym(RTLD_DEFAULT, name)`: search every image already loaded.
pub fn lookup_default(name: &CStr) -> Option<NonNull<c_void>> {
    let symbol = unsafe {
        // SAFETY: `name` is NUL-terminated; RTLD_DEFAULT needs no handle.
        libc::dlsym(libc::RTLD_DEFAULT, name.as_ptr())
    };
    NonNull::new(symbol)
}
