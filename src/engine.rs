use std::process::ExitCode;
use std::rc::Rc;
use std::time::Instant;

use anyhow::Result;
use log::{error, info, warn};

use crate::config::DemoConfig;
use crate::demos::Demo;
use crate::render::Driver;
use crate::scene::Scene;
use crate::utils::logging;
use crate::window::{run_until_closed, GlWindow};

/// Exit status when no window, context or GL loader could be set up; the shell
/// sees `-1` as 255.
pub const INIT_FAILURE: u8 = 255;

/// Runs one demo to completion: window, scene, frame loop, teardown.
pub fn run_demo(demo: &Demo) -> ExitCode {
    let started = Instant::now();

    let (config, config_error) = match DemoConfig::load() {
        Ok(config) => (config, None),
        Err(err) => (DemoConfig::default(), Some(err)),
    };
    if let Err(err) = logging::init(&config.log_level) {
        eprintln!("Failed to initialize logging: {err:#}");
    }
    if let Some(err) = config_error {
        warn!("{:#}; using defaults", err);
    }

    let window = match GlWindow::create(&config.window, demo.title) {
        Ok(window) => window,
        Err(err) => {
            error!("Failed to create window: {}", err);
            return ExitCode::from(INIT_FAILURE);
        }
    };

    let driver: Rc<dyn Driver> = match window.load_driver() {
        Ok(driver) => Rc::new(driver),
        Err(err) => {
            error!("Failed to load OpenGL: {}", err);
            return ExitCode::from(INIT_FAILURE);
        }
    };

    match run_in_window(window, driver, demo, &config, started) {
        Ok(frames) => {
            info!("Window closed after {} frames", frames);
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run_in_window(
    mut window: GlWindow,
    driver: Rc<dyn Driver>,
    demo: &Demo,
    config: &DemoConfig,
    started: Instant,
) -> Result<u64> {
    info!("OpenGL version: {}", driver.version());

    let scene = Scene::prepare(
        Rc::clone(&driver),
        demo,
        &config.rendering,
        started.elapsed().as_secs_f32(),
    )?;

    let mut viewport = None;
    let frames = run_until_closed(&mut window, |frame| {
        if viewport != Some(frame.size) {
            driver.viewport(frame.size.0 as i32, frame.size.1 as i32);
            viewport = Some(frame.size);
        }
        scene.draw(started.elapsed().as_secs_f32());
    })?;

    // The program must go before the context it lives in.
    scene.release();
    drop(window);
    Ok(frames)
}
