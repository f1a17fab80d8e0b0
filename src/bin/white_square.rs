use std::process::ExitCode;

use glpolys::demos::square;

fn main() -> ExitCode {
    glpolys::run_demo(&square::demo())
}
