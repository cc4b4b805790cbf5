use std::sync::Arc;
use std::time::Instant;
use winit::event::{ElementState, Event, KeyEvent, WindowEvent};
use winit::event_loop::EventLoop;
use winit::keyboard::{Key, NamedKey};
use winit::window::{Window, WindowBuilder};

use app_core::{
    action_for_key, KeyAction, SimulationContext, SimulationParameters, StartupConfig,
    DEFAULT_RESOLUTION,
};

/// Translate a winit key into the browser `KeyboardEvent.key` names the
/// shortcut table uses.
fn key_name(key: &Key) -> Option<&str> {
    match key {
        Key::Character(s) => Some(s.as_str()),
        Key::Named(NamedKey::ArrowUp) => Some("ArrowUp"),
        Key::Named(NamedKey::ArrowDown) => Some("ArrowDown"),
        _ => None,
    }
}

/// The window title stands in for the hint overlay.
fn update_title(window: &Window, params: &SimulationParameters, detailed: bool) {
    if detailed {
        window.set_title(&format!(
            "Particles • {} • {} particles • speed {:.2}",
            params.behavior,
            params.particle_count.get(),
            params.speed
        ));
    } else {
        window.set_title("Particles");
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    // Same keys as the web query string: `app-native count=20000 effect=spores seed=7`
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = StartupConfig::from_pairs(args.iter().map(String::as_str))?;

    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title("Particles")
            .with_inner_size(winit::dpi::PhysicalSize::new(
                DEFAULT_RESOLUTION[0] as u32,
                DEFAULT_RESOLUTION[1] as u32,
            ))
            .build(&event_loop)?,
    );
    let size = window.inner_size();

    let instance = wgpu::Instance::default();
    let scene = pollster::block_on(app_core::render::connect(
        &instance,
        window.clone(),
        size.width,
        size.height,
    ));
    if scene.is_headless() {
        log::info!("[gpu] no renderer; the simulation runs without drawing");
    }

    let start = Instant::now();
    let sim = SimulationContext::new(&config, scene, 0.0)?;
    sim.resize(size.width, size.height);
    let mut detailed_title = config.show_panel;
    update_title(&window, &sim.params(), detailed_title);

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent {
            event: WindowEvent::Resized(size),
            ..
        } => sim.resize(size.width, size.height),
        Event::WindowEvent {
            event: WindowEvent::CloseRequested,
            ..
        } => elwt.exit(),
        Event::WindowEvent {
            event:
                WindowEvent::KeyboardInput {
                    event:
                        KeyEvent {
                            logical_key,
                            state: ElementState::Pressed,
                            ..
                        },
                    ..
                },
            ..
        } => {
            let Some(name) = key_name(&logical_key) else {
                return;
            };
            let action = action_for_key(name, &sim.params());
            match action {
                Some(KeyAction::Change(change)) => {
                    if sim.apply_logged(change).is_some() {
                        update_title(&window, &sim.params(), detailed_title);
                    }
                }
                Some(KeyAction::TogglePanel) => {
                    detailed_title = !detailed_title;
                    update_title(&window, &sim.params(), detailed_title);
                }
                None => {}
            }
        }
        Event::AboutToWait => {
            let size = window.inner_size();
            let result = sim.tick(start.elapsed().as_secs_f64(), |scene, snapshot| {
                scene.render(snapshot, size.width, size.height)
            });
            match result {
                Ok(()) => window.request_redraw(),
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("surface out of memory");
                    elwt.exit();
                }
                Err(e) => log::warn!("render error: {:?}", e),
            }
        }
        _ => {}
    })?;
    Ok(())
}
