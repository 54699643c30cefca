//! The five runtime functions a `.wtf` session can call (`spec.md` §6).
//!
//! `#[no_mangle] extern "C"` so the JIT's in-process symbol lookup finds
//! them under the exact names declared by `wtfc_gen::BUILTINS`.

use std::io::Write;
use std::time::Duration;

#[no_mangle]
pub extern "C" fn pchar(ascii: f64) -> f64 {
    print!("{}", ascii as u8 as char);
    let _ = std::io::stdout().flush();
    0.0
}

#[no_mangle]
pub extern "C" fn pdoub(value: f64) -> f64 {
    print!("{value}");
    let _ = std::io::stdout().flush();
    0.0
}

#[no_mangle]
pub extern "C" fn pline() -> f64 {
    println!();
    0.0
}

#[no_mangle]
pub extern "C" fn wait(micros: f64) -> f64 {
    if micros > 0.0 {
        std::thread::sleep(Duration::from_micros(micros as u64));
    }
    0.0
}

#[no_mangle]
pub extern "C" fn clrscr() -> f64 {
    print!("\x1b[H\x1b[2J");
    let _ = std::io::stdout().flush();
    0.0
}
