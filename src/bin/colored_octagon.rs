use std::process::ExitCode;

use glpolys::demos::octagon;

fn main() -> ExitCode {
    glpolys::run_demo(&octagon::demo())
}
