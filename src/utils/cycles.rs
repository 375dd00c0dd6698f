//! CPU cycle counter.
//!
//! x86/x86_64 read the TSC fenced by LFENCE on both sides; aarch64 reads the
//! virtual counter CNTVCT_EL0, which ticks at a fixed frequency rather than
//! with the core clock.

#[cfg(not(any(target_arch = "x86_64", target_arch = "x86", target_arch = "aarch64")))]
compile_error!("cpu_cycles feature requires x86, x86_64, or aarch64 architecture");

/// Read the current cycle counter.
#[inline(always)]
pub fn read_cycles() -> u64 {
    #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
    {
        #[cfg(target_arch = "x86")]
        use core::arch::x86::{_mm_lfence, _rdtsc};
        #[cfg(target_arch = "x86_64")]
        use core::arch::x86_64::{_mm_lfence, _rdtsc};

        unsafe {
            _mm_lfence();
            let cycles = _rdtsc();
            _mm_lfence();
            cycles
        }
    }

    #[cfg(target_arch = "aarch64")]
    {
        let val: u64;
        unsafe {
            core::arch::asm!("mrs {}, cntvct_el0", out(reg) val);
        }
        val
    }
}
