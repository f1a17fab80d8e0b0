use std::process::ExitCode;

use glpolys::demos::offset;

fn main() -> ExitCode {
    glpolys::run_demo(&offset::demo())
}
