// File: crates/plotish-cli/src/window.rs
// Summary: On-screen display sink: shows rendered frames in one window via RGBA blit (CPU) using winit + softbuffer.

use std::fmt;
use std::num::NonZeroU32;

use log::debug;
use plotish_core::{Display, Error, Frame, Result};
use winit::dpi::LogicalSize;
use winit::event::{ElementState, Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::platform::run_return::EventLoopExtRunReturn;
use winit::window::{Window, WindowBuilder};

/// Opens a window on `show`; any key cycles through the figures, closing the window returns.
#[derive(Default)]
pub struct WindowDisplay;

impl Display for WindowDisplay {
    fn show(&mut self, frames: Vec<Frame>) -> Result<()> {
        let Some(first) = frames.first() else {
            return Ok(());
        };
        let mut event_loop = EventLoop::new();
        let window = WindowBuilder::new()
            .with_title(title(&frames, 0))
            .with_inner_size(LogicalSize::new(first.width as f64, first.height as f64))
            .build(&event_loop)
            .map_err(display_err)?;

        let context = unsafe { softbuffer::Context::new(&window) }.map_err(display_err)?;
        let mut surface = unsafe { softbuffer::Surface::new(&context, &window) }.map_err(display_err)?;

        let mut idx = 0usize;
        let mut failure = None;
        event_loop.run_return(|event, _, cf| {
            *cf = ControlFlow::Wait;
            match event {
                Event::WindowEvent { event, .. } => match event {
                    WindowEvent::CloseRequested => *cf = ControlFlow::Exit,
                    WindowEvent::KeyboardInput { input, .. } if input.state == ElementState::Pressed => {
                        idx = (idx + 1) % frames.len();
                        debug!("showing figure {idx}");
                        window.set_title(&title(&frames, idx));
                        window.request_redraw();
                    }
                    WindowEvent::Resized(_) => window.request_redraw(),
                    _ => {}
                },
                Event::RedrawRequested(_) => {
                    if let Err(e) = blit(&mut surface, &window, &frames[idx]) {
                        failure = Some(e);
                        *cf = ControlFlow::Exit;
                    }
                }
                _ => {}
            }
        });
        failure.map_or(Ok(()), Err)
    }
}

fn title(frames: &[Frame], idx: usize) -> String {
    let name = if frames[idx].title.is_empty() { "figure" } else { frames[idx].title.as_str() };
    format!("{name} ({}/{})", idx + 1, frames.len())
}

fn display_err(e: impl fmt::Display) -> Error {
    Error::Display(e.to_string())
}

/// Nearest-neighbour scale of `frame` into the window buffer (0RGB).
fn blit(surface: &mut softbuffer::Surface, window: &Window, frame: &Frame) -> Result<()> {
    let size = window.inner_size();
    let (Some(w), Some(h)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) else {
        return Ok(());
    };
    surface.resize(w, h).map_err(display_err)?;
    let mut buffer = surface.buffer_mut().map_err(display_err)?;

    let (ww, wh) = (size.width as usize, size.height as usize);
    let (fw, fh) = (frame.width as usize, frame.height as usize);
    for y in 0..wh {
        let sy = y * fh / wh;
        for x in 0..ww {
            let sx = x * fw / ww;
            let i = (sy * fw + sx) * 4;
            let px = &frame.rgba[i..i + 4];
            buffer[y * ww + x] = (px[0] as u32) << 16 | (px[1] as u32) << 8 | px[2] as u32;
        }
    }
    buffer.present().map_err(display_err)
}
