// Runs the real binary under a pseudo terminal: one short session is started,
// paused and quit with the keyboard. Needs a tty, so it is unix-only and
// ignored unless asked for with `--ignored`.

#![cfg(unix)]

use std::time::Duration;

use expectrl::{spawn, Eof};

#[test]
#[ignore]
fn start_pause_and_quit() -> Result<(), Box<dyn std::error::Error>> {
    let bin = assert_cmd::cargo::cargo_bin("pomo");
    let cmd = format!("{} --no-animations", bin.display());

    let mut p = spawn(cmd)?;

    // wait for the alternate screen
    std::thread::sleep(Duration::from_millis(200));

    // start, let a couple of seconds pass, pause
    p.send(" ")?;
    std::thread::sleep(Duration::from_millis(2100));
    p.send(" ")?;
    std::thread::sleep(Duration::from_millis(200));

    p.send("q")?;
    p.expect(Eof)?;
    Ok(())
}
