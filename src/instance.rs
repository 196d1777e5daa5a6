//! Machine-wide single-instance guard.

use std::io;

/// Held for the lifetime of the first instance. Dropping it releases the name.
#[derive(Debug)]
pub struct InstanceGuard {
    #[cfg(windows)]
    _mutex: windows_mutex::OwnedMutex,
    #[cfg(target_os = "linux")]
    _socket: std::os::unix::net::UnixListener,
}

/// Claims `name`, returning `None` when another instance already holds it.
#[cfg(windows)]
pub fn acquire(name: &str) -> io::Result<Option<InstanceGuard>> {
    Ok(windows_mutex::OwnedMutex::create(name)?.map(|mutex| InstanceGuard { _mutex: mutex }))
}

/// Claims `name` in the abstract socket namespace, which the kernel frees on exit.
#[cfg(target_os = "linux")]
pub fn acquire(name: &str) -> io::Result<Option<InstanceGuard>> {
    use std::os::linux::net::SocketAddrExt;
    use std::os::unix::net::{SocketAddr, UnixListener};

    let addr = SocketAddr::from_abstract_name(name.as_bytes())?;
    match UnixListener::bind_addr(&addr) {
        Ok(socket) => Ok(Some(InstanceGuard { _socket: socket })),
        Err(e) if e.kind() == io::ErrorKind::AddrInUse => Ok(None),
        Err(e) => Err(e),
    }
}

/// No named primitive is used on other hosts; every instance is the first.
#[cfg(not(any(windows, target_os = "linux")))]
pub fn acquire(_name: &str) -> io::Result<Option<InstanceGuard>> {
    Ok(Some(InstanceGuard {}))
}

#[cfg(windows)]
mod windows_mutex {
    use std::io;

    use windows::{
        Win32::{
            Foundation::{CloseHandle, ERROR_ALREADY_EXISTS, GetLastError, HANDLE},
            System::Threading::CreateMutexW,
        },
        core::HSTRING,
    };

    #[derive(Debug)]
    pub struct OwnedMutex(HANDLE);

    impl OwnedMutex {
        pub fn create(name: &str) -> io::Result<Option<Self>> {
            let name = HSTRING::from(format!("Global\\{name}"));
            let handle = unsafe { CreateMutexW(None, true, &name) }.map_err(io::Error::other)?;

            if unsafe { GetLastError() } == ERROR_ALREADY_EXISTS {
                unsafe {
                    let _ = CloseHandle(handle);
                }
                return Ok(None);
            }
            Ok(Some(Self(handle)))
        }
    }

    impl Drop for OwnedMutex {
        fn drop(&mut self) {
            unsafe {
                let _ = CloseHandle(self.0);
            }
        }
    }
}
