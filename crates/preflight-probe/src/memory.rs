//! Total installed memory, as reported by the kernel.

use crate::ProbeError;

const BYTES_PER_MB: u128 = 1024 * 1024;

/// Raw memory figures: `total_units` units of `unit_size` bytes each.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MemoryInfo {
    pub total_units: u64,
    pub unit_size: u64,
}

impl MemoryInfo {
    pub fn total_bytes(&self) -> u128 {
        u128::from(self.total_units) * u128::from(self.unit_size)
    }

    /// Whole megabytes, truncated.
    pub fn total_mb(&self) -> u64 {
        u64::try_from(self.total_bytes() / BYTES_PER_MB).unwrap_or(u64::MAX)
    }
}

pub trait MemoryProbe {
    fn read_memory_info(&self) -> Result<MemoryInfo, ProbeError>;
}

/// Reads memory through `sysinfo(2)`.
#[derive(Clone, Copy, Debug, Default)]
pub struct SysinfoMemoryProbe;

impl MemoryProbe for SysinfoMemoryProbe {
    fn read_memory_info(&self) -> Result<MemoryInfo, ProbeError> {
        let info = sysinfo()?;
        tracing::debug!(
            total_units = info.total_units,
            unit_size = info.unit_size,
            "read memory info"
        );
        Ok(info)
    }
}

#[cfg(any(target_os = "linux", target_os = "android"))]
#[allow(unsafe_code)]
fn sysinfo() -> Result<MemoryInfo, ProbeError> {
    let mut info = std::mem::MaybeUninit::<libc::sysinfo>::zeroed();
    // SAFETY: `info` points to writable storage for one `struct sysinfo`.
    let rc = unsafe { libc::sysinfo(info.as_mut_ptr()) };
    if rc != 0 {
        return Err(ProbeError::Sysinfo(std::io::Error::last_os_error()));
    }
    // SAFETY: sysinfo returned 0, so the kernel filled the struct.
    let info = unsafe { info.assume_init() };

    // Kernels before 2.3.23 report sizes in bytes and leave mem_unit at zero.
    let unit_size = match u64::from(info.mem_unit) {
        0 => 1,
        n => n,
    };

    Ok(MemoryInfo {
        total_units: u64::from(info.totalram),
        unit_size,
    })
}

#[cfg(not(any(target_os = "linux", target_os = "android")))]
fn sysinfo() -> Result<MemoryInfo, ProbeError> {
    Err(ProbeError::Unsupported)
}
