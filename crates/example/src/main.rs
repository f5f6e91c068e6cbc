//! Example pipe plumbing with descriptor guards.
//!
//! Creates a `pipe(2)` pair held in [`ScopedFd`](clasp::fd::ScopedFd)
//! guards, pushes a few bytes through it with raw syscalls, then shows the
//! two ways a descriptor leaves a guard: `detach` (caller closes) and drop
//! (guard closes).
//!
//! # Usage
//!
//! ```text
//! RUST_LOG=debug cargo run -p example --bin pipe_demo
//! ```

#[cfg(unix)]
fn main() {
    use clasp::fd;
    use tracing::info;
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let (read_end, mut write_end) = fd::pipe().expect("pipe(2)");
    info!(
        read_fd = read_end.get(),
        write_fd = write_end.get(),
        "acquired pipe"
    );

    let payload = b"clasp";
    // SAFETY: `write_end` holds a live descriptor and `payload` is readable.
    let written = unsafe { libc::write(write_end.get(), payload.as_ptr().cast(), payload.len()) };
    info!(written, "wrote through the guarded write end");

    let mut buffer = [0u8; 16];
    // SAFETY: `read_end` holds a live descriptor and `buffer` is writable
    // for `buffer.len()` bytes.
    let received =
        unsafe { libc::read(read_end.get(), buffer.as_mut_ptr().cast(), buffer.len()) };
    info!(received, "read back through the guarded read end");

    // Hand the write end to "someone else": the guard no longer closes it.
    let raw = write_end.detach();
    assert!(!write_end.is_valid());
    info!(raw, "detached the write end; closing it manually");
    // SAFETY: `raw` was detached above; this is its only close.
    unsafe { libc::close(raw) };

    info!(read_fd = read_end.get(), "read end closes when its guard drops");
}

#[cfg(not(unix))]
fn main() {}
