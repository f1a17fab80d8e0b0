use std::ffi::CString;
use std::num::NonZeroU32;
use std::ptr;
use std::time::Duration;

use glutin::config::{Config, ConfigTemplateBuilder};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, GlProfile, PossiblyCurrentContext, Version,
};
use glutin::display::{GetGlDisplay, GlDisplay};
use glutin::prelude::*;
use glutin::surface::{Surface, SwapInterval, WindowSurface};
use glutin_winit::{DisplayBuilder, GlWindow as _};
use log::{debug, info, warn};
use raw_window_handle::HasRawWindowHandle;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::{Event, WindowEvent};
use winit::event_loop::EventLoop;
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window, WindowBuilder};

use super::{FrameTarget, WindowError};
use crate::config::WindowConfig;
use crate::render::{DriverError, GlDriver};

/// A window with a current OpenGL 3.3 compatibility context.
///
/// Events are pumped manually once per frame, so the caller owns the loop.
/// Dropping the window tears down surface, context and event loop in that
/// order.
pub struct GlWindow {
    gl_surface: Surface<WindowSurface>,
    gl_context: PossiblyCurrentContext,
    window: Window,
    event_loop: EventLoop<()>,
    close_requested: bool,
}

impl GlWindow {
    pub fn create(config: &WindowConfig, title: &str) -> Result<Self, WindowError> {
        let event_loop = EventLoop::new().map_err(|err| WindowError::EventLoop(err.to_string()))?;

        let window_builder = WindowBuilder::new()
            .with_title(title)
            .with_inner_size(LogicalSize::new(config.width, config.height))
            .with_resizable(config.resizable);

        let template = ConfigTemplateBuilder::new().with_alpha_size(8);
        let display_builder = DisplayBuilder::new().with_window_builder(Some(window_builder));

        let (window, gl_config) = display_builder
            .build(&event_loop, template, pick_config)
            .map_err(|err| WindowError::Display(err.to_string()))?;
        let window = window.ok_or(WindowError::NoWindow)?;

        let context_attributes = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
            .with_profile(GlProfile::Compatibility)
            .build(Some(window.raw_window_handle()));

        let gl_display = gl_config.display();
        let not_current = unsafe { gl_display.create_context(&gl_config, &context_attributes)? };

        let attrs = window.build_surface_attributes(<_>::default());
        let gl_surface = unsafe { gl_display.create_window_surface(&gl_config, &attrs)? };
        let gl_context = not_current.make_current(&gl_surface)?;

        if config.vsync {
            let interval = SwapInterval::Wait(NonZeroU32::MIN);
            if let Err(err) = gl_surface.set_swap_interval(&gl_context, interval) {
                warn!("Could not enable vsync: {}", err);
            }
        }

        info!("Created {}x{} window \"{}\"", config.width, config.height, title);

        Ok(Self {
            gl_surface,
            gl_context,
            window,
            event_loop,
            close_requested: false,
        })
    }

    /// Loads GL entry points from this window's context.
    pub fn load_driver(&self) -> Result<GlDriver, DriverError> {
        let gl_display = self.gl_context.display();
        GlDriver::load_with(|symbol| match CString::new(symbol) {
            Ok(symbol) => gl_display.get_proc_address(&symbol) as *const _,
            Err(_) => ptr::null(),
        })
    }

    fn resize(&self, size: PhysicalSize<u32>) {
        if let (Some(width), Some(height)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) {
            self.gl_surface.resize(&self.gl_context, width, height);
        }
    }
}

fn pick_config(configs: Box<dyn Iterator<Item = Config> + '_>) -> Config {
    // glutin only calls the picker with at least one candidate.
    configs
        .max_by_key(|config| config.num_samples())
        .expect("display offered no configs")
}

impl FrameTarget for GlWindow {
    fn should_close(&self) -> bool {
        self.close_requested
    }

    fn poll_events(&mut self) {
        let window_id = self.window.id();
        let mut close_requested = false;
        let mut resized = None;

        let status = self.event_loop.pump_events(Some(Duration::ZERO), |event, _| {
            if let Event::WindowEvent { window_id: id, event } = event {
                if id != window_id {
                    return;
                }
                match event {
                    WindowEvent::CloseRequested => close_requested = true,
                    WindowEvent::Resized(size) => resized = Some(size),
                    _ => (),
                }
            }
        });

        if let PumpStatus::Exit(code) = status {
            debug!("Event loop exited with code {}", code);
            close_requested = true;
        }
        if let Some(size) = resized {
            self.resize(size);
        }
        self.close_requested |= close_requested;
    }

    fn swap_buffers(&mut self) -> Result<(), WindowError> {
        self.gl_surface
            .swap_buffers(&self.gl_context)
            .map_err(|err| WindowError::Swap(err.to_string()))
    }

    fn drawable_size(&self) -> (u32, u32) {
        let size = self.window.inner_size();
        (size.width, size.height)
    }
}
