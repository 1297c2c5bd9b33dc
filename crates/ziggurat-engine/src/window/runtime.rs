use anyhow::{Context, Result};
use ouroboros::self_referencing;
use std::collections::HashMap;

use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App as CoreApp, AppControl, FrameCtx, WindowCtx};
use crate::device::{Gpu, GpuInit};
use crate::input::platform::winit::translate_window_event;
use crate::input::{InputFrame, InputState};
use crate::time::{FrameClock, FrameTime};

/// How a window should be opened.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,

    /// Initial inner size in logical pixels.
    pub initial_size: (f64, f64),
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "ziggurat".to_string(),
            initial_size: (1024.0, 768.0),
        }
    }
}

/// Requests an app callback can make of the runtime. Nothing happens
/// immediately; the queue is drained once the callback returns.
#[derive(Default)]
pub struct RuntimeCtx {
    requests: Vec<Request>,
}

impl RuntimeCtx {
    pub fn open_window(&mut self, config: RuntimeConfig) {
        self.requests.push(Request::OpenWindow(config));
    }

    pub fn close_window(&mut self, id: WindowId) {
        self.requests.push(Request::CloseWindow(id));
    }

    pub fn exit(&mut self) {
        self.requests.push(Request::Exit);
    }
}

enum Request {
    OpenWindow(RuntimeConfig),
    CloseWindow(WindowId),
    Exit,
}

/// Owner of the winit event loop.
pub struct Runtime;

impl Runtime {
    /// Runs the event loop until the application exits.
    ///
    /// `first_window` describes the first window; further windows go through
    /// [`RuntimeCtx::open_window`]. Every window gets its own GPU context
    /// built from `gpu_init`.
    pub fn run<A>(first_window: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: CoreApp + 'static,
    {
        let event_loop = EventLoop::new().context("event loop construction failed")?;
        let mut state = RuntimeState::new(first_window, gpu_init, app);

        event_loop
            .run_app(&mut state)
            .context("event loop exited with error")?;

        Ok(())
    }
}

// The surface inside `Gpu` borrows the window it presents to, so window and
// GPU context live in one self-referencing slot.
#[self_referencing]
struct WindowSlot {
    input_state: InputState,
    input_frame: InputFrame,
    clock: FrameClock,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct RuntimeState<A>
where
    A: CoreApp + 'static,
{
    first_window: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    slots: HashMap<WindowId, WindowSlot>,
    exiting: bool,
}

impl<A> RuntimeState<A>
where
    A: CoreApp + 'static,
{
    fn new(first_window: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            first_window,
            gpu_init,
            app,
            slots: HashMap::new(),
            exiting: false,
        }
    }

    fn open_window(
        &mut self,
        event_loop: &ActiveEventLoop,
        config: RuntimeConfig,
    ) -> Result<WindowId> {
        let (width, height) = config.initial_size;
        let attrs = Window::default_attributes()
            .with_title(config.title)
            .with_inner_size(LogicalSize::new(width, height));

        let window = event_loop
            .create_window(attrs)
            .context("window creation failed")?;

        let id = window.id();
        let gpu_init = self.gpu_init.clone();

        let slot = WindowSlotTryBuilder {
            input_state: InputState::default(),
            input_frame: InputFrame::default(),
            clock: FrameClock::default(),
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
        .context("GPU initialization failed for window")?;

        slot.with_gpu(|gpu| {
            let info = gpu.adapter_info();
            log::info!("window {id:?}: adapter \"{}\" ({:?})", info.name, info.backend);
            log::debug!("window {id:?}: device features {:?}", gpu.features());
        });

        self.slots.insert(id, slot);
        Ok(id)
    }

    fn resize_surface(&mut self, window_id: WindowId, new_size: PhysicalSize<u32>) {
        if let Some(slot) = self.slots.get_mut(&window_id) {
            slot.with_gpu_mut(|gpu| gpu.resize(new_size));
            slot.with_window(|w| w.request_redraw());
        }
    }

    /// Runs one frame for `window_id`: tick the clock, call the app, reset
    /// per-frame input, then apply whatever the app asked for.
    fn drive_frame(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId) {
        let mut requests = RuntimeCtx::default();
        let mut control = AppControl::Continue;

        let (app, slots) = (&mut self.app, &mut self.slots);
        if let Some(slot) = slots.get_mut(&window_id) {
            slot.with_mut(|fields| {
                let time: FrameTime = fields.clock.tick();

                // `ctx` borrows the slot fields; scope it so the input frame
                // can be cleared afterwards.
                {
                    let mut ctx = FrameCtx {
                        window: WindowCtx {
                            id: window_id,
                            window: fields.window,
                        },
                        gpu: fields.gpu,
                        input: fields.input_state,
                        input_frame: fields.input_frame,
                        time,
                        runtime: &mut requests,
                    };

                    control = app.on_frame(&mut ctx);
                }

                fields.input_frame.clear();
            });
        }

        if control == AppControl::Exit {
            requests.exit();
        }

        self.drain_requests(event_loop, requests);
    }

    fn drain_requests(&mut self, event_loop: &ActiveEventLoop, mut ctx: RuntimeCtx) {
        for req in ctx.requests.drain(..) {
            match req {
                Request::OpenWindow(cfg) => match self.open_window(event_loop, cfg) {
                    Ok(id) => log::debug!("opened window {id:?}"),
                    Err(e) => {
                        log::error!("could not open window: {e:#}");
                        self.exiting = true;
                    }
                },
                Request::CloseWindow(id) => {
                    self.slots.remove(&id);
                }
                Request::Exit => self.exiting = true,
            }
        }

        // Nothing left to drive once the last window is gone.
        if self.slots.is_empty() {
            self.exiting = true;
        }

        if self.exiting {
            event_loop.exit();
        }
    }
}

impl<A> ApplicationHandler for RuntimeState<A>
where
    A: CoreApp + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        // Fires again on resume from suspend; the slot map is already populated then.
        if !self.slots.is_empty() {
            return;
        }

        match self.open_window(event_loop, self.first_window.clone()) {
            Ok(_) => {
                for slot in self.slots.values() {
                    slot.with_window(|w| w.request_redraw());
                }
            }
            Err(e) => {
                log::error!("failed to create first_window window: {e:#}");
                self.exiting = true;
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exiting {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        // Keyboard panning is sampled per frame, not per event, so every
        // window requests the next redraw unconditionally.
        for slot in self.slots.values() {
            slot.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exiting {
            event_loop.exit();
            return;
        }

        // Input translation and the app's raw-event hook run before
        // lifecycle handling, so state is current when a frame fires.
        // Field borrows are split up front; `self` must not be captured
        // inside the ouroboros closure.
        let (app, slots) = (&mut self.app, &mut self.slots);
        let Some(slot) = slots.get_mut(&window_id) else {
            return;
        };

        let mut app_exit = false;
        slot.with_mut(|fields| {
            if let Some(ev) = translate_window_event(fields.window, fields.input_state, &event) {
                fields.input_state.apply(fields.input_frame, ev);
            }

            if app.on_window_event(window_id, &event) == AppControl::Exit {
                app_exit = true;
            }
        });

        if app_exit {
            self.exiting = true;
            event_loop.exit();
            return;
        }

        match &event {
            WindowEvent::CloseRequested => {
                self.slots.remove(&window_id);
                if self.slots.is_empty() {
                    self.exiting = true;
                    event_loop.exit();
                }
            }

            WindowEvent::Resized(new_size) => {
                self.resize_surface(window_id, *new_size);
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                // Physical size changes with the scale factor even when the
                // logical size does not.
                let size = self
                    .slots
                    .get(&window_id)
                    .map(|slot| slot.with_window(|w| w.inner_size()));
                if let Some(size) = size {
                    self.resize_surface(window_id, size);
                }
            }

            WindowEvent::RedrawRequested => {
                self.drive_frame(event_loop, window_id);
            }

            _ => {}
        }

        if self.exiting {
            event_loop.exit();
        }
    }
}
