use std::ffi::c_char;
use std::ffi::c_void;
use std::ptr;
use std::ptr::NonNull;

use crate::AuthorizationBroker;
use crate::AuthorizationFlags;
use crate::ENVIRONMENT_PROMPT;
use crate::ERR_AUTHORIZATION_INTERNAL;
use crate::ERR_AUTHORIZATION_SUCCESS;
use crate::OsStatus;
use crate::RightsRequest;

/// Raw `AuthorizationRef` as Security.framework sees it.
pub type AuthorizationRef = *const c_void;

#[repr(C)]
struct AuthorizationItem {
    name: *const c_char,
    value_length: usize,
    value: *mut c_void,
    flags: u32,
}

/// `AuthorizationItemSet`, which is also `AuthorizationRights` and
/// `AuthorizationEnvironment`.
#[repr(C)]
struct AuthorizationItemSet {
    count: u32,
    items: *mut AuthorizationItem,
}

#[link(name = "Security", kind = "framework")]
unsafe extern "C" {
    fn AuthorizationCreate(
        rights: *const AuthorizationItemSet,
        environment: *const AuthorizationItemSet,
        flags: u32,
        authorization: *mut AuthorizationRef,
    ) -> OsStatus;

    fn AuthorizationCopyRights(
        authorization: AuthorizationRef,
        rights: *const AuthorizationItemSet,
        environment: *const AuthorizationItemSet,
        flags: u32,
        authorized_rights: *mut *mut AuthorizationItemSet,
    ) -> OsStatus;

    fn AuthorizationFree(authorization: AuthorizationRef, flags: u32) -> OsStatus;
}

/// Authorization Services from Security.framework.
#[derive(Debug, Default, Clone, Copy)]
pub struct SecurityBroker;

/// A non-null `AuthorizationRef` created by [`SecurityBroker`].
#[derive(Debug)]
pub struct SecurityAuthorizationRef(NonNull<c_void>);

impl SecurityAuthorizationRef {
    pub fn as_raw(&self) -> AuthorizationRef {
        self.0.as_ptr().cast_const()
    }
}

impl AuthorizationBroker for SecurityBroker {
    type Handle = SecurityAuthorizationRef;

    fn create(&self) -> Result<Self::Handle, OsStatus> {
        let mut raw: AuthorizationRef = ptr::null();
        let status = unsafe {
            // SAFETY: null rights and environment are documented as "empty";
            // `raw` is a valid out-pointer.
            AuthorizationCreate(
                ptr::null(),
                ptr::null(),
                AuthorizationFlags::DEFAULTS.bits(),
                &mut raw,
            )
        };
        if status != ERR_AUTHORIZATION_SUCCESS {
            return Err(status);
        }
        NonNull::new(raw.cast_mut())
            .map(SecurityAuthorizationRef)
            .ok_or(ERR_AUTHORIZATION_INTERNAL)
    }

    fn copy_rights(
        &self,
        handle: &Self::Handle,
        request: &RightsRequest<'_>,
    ) -> Result<(), OsStatus> {
        let mut right = AuthorizationItem {
            name: request.right.as_ptr(),
            value_length: 0,
            value: ptr::null_mut(),
            flags: 0,
        };
        let rights = AuthorizationItemSet {
            count: 1,
            items: &mut right,
        };

        // The prompt is passed by length, so it does not need a trailing NUL.
        let mut prompt_item = request.prompt.map(|prompt| AuthorizationItem {
            name: ENVIRONMENT_PROMPT.as_ptr(),
            value_length: prompt.len(),
            value: prompt.as_ptr().cast_mut().cast(),
            flags: 0,
        });
        let environment = AuthorizationItemSet {
            count: u32::from(prompt_item.is_some()),
            items: prompt_item.as_mut().map_or(ptr::null_mut(), ptr::from_mut),
        };

        let status = unsafe {
            // SAFETY: `handle` came from `AuthorizationCreate` and is still live;
            // `rights`, `environment` and the items they point to outlive the call.
            AuthorizationCopyRights(
                handle.as_raw(),
                &rights,
                &environment,
                request.flags.bits(),
                ptr::null_mut(),
            )
        };
        if status == ERR_AUTHORIZATION_SUCCESS {
            Ok(())
        } else {
            Err(status)
        }
    }

    fn free(&self, handle: &Self::Handle) -> Result<(), OsStatus> {
        let status = unsafe {
            // SAFETY: `Authorization` calls this once, from `Drop`.
            AuthorizationFree(handle.as_raw(), AuthorizationFlags::DEFAULTS.bits())
        };
        if status == ERR_AUTHORIZATION_SUCCESS {
            Ok(())
        } else {
            Err(status)
        }
    }
}
