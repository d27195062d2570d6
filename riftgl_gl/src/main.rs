use std::{cell::Cell, rc::Rc};

use color_eyre::{eyre::OptionExt, Result as EyreResult};
use glam::IVec2;
use riftgl_gl::{
    buffer::{IndexBuffer, VertexBuffer},
    gl,
    glfw::{self, Key, Window},
    info::{GlInteger, GlString},
    Framebuffer, GlErrorGuard,
};

struct DemoConfig {
    window_size: IVec2,
    title: &'static str,
    multisample: bool,
    gl_version: (i32, i32),
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            window_size: IVec2::new(1000, 800),
            title: "riftgl",
            multisample: true,
            gl_version: (4, 5),
        }
    }
}

#[repr(C)]
#[derive(Clone, Copy)]
struct Vertex {
    pos: [f32; 2],
    color: [f32; 3],
}

const QUAD: [Vertex; 4] = [
    Vertex {
        pos: [-1.0, -1.0],
        color: [1.0, 0.0, 0.0],
    },
    Vertex {
        pos: [1.0, -1.0],
        color: [0.0, 1.0, 0.0],
    },
    Vertex {
        pos: [1.0, 1.0],
        color: [0.0, 0.0, 1.0],
    },
    Vertex {
        pos: [-1.0, 1.0],
        color: [1.0, 1.0, 1.0],
    },
];

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    env_logger::init();

    let config = DemoConfig::default();

    glfw::install_errors();
    glfw::init().ok_or_eyre("glfw init failed")?;
    glfw::hint_core_profile(config.gl_version.0, config.gl_version.1);

    let window = Window::create(config.window_size, config.title)?;
    glfw::load_gl(&window);

    for info in [GlString::Vendor, GlString::Renderer, GlString::Version] {
        log::info!("{info:?}: {}", info.get_gl().unwrap_or("<unknown>"));
    }
    log::info!("max samples: {}", GlInteger::MaxSamples.get_gl());

    let vertices = VertexBuffer::from_array(&QUAD);
    let index_data: Vec<u16> = vec![0, 1, 2, 2, 3, 0];
    let indices = IndexBuffer::from_slice(&index_data);
    VertexBuffer::unbind();
    IndexBuffer::unbind();
    log::debug!(
        "uploaded quad: vertex buffer {}, index buffer {}",
        vertices.as_handle(),
        indices.as_handle()
    );

    let resized = Rc::new(Cell::new(None));
    window.install_framebuffer_size_callback({
        let resized = resized.clone();
        move |size: IVec2| resized.set(Some(size))
    });

    let mut size = window.get_framebuffer_size();
    let mut target: Framebuffer = Framebuffer::new();
    target.init(size, config.multisample)?;

    let mut frame = 0u32;
    while !window.should_close() && !window.is_key_down(Key::Escape) {
        if let Some(new_size) = resized.take().filter(|s: &IVec2| s.min_element() > 0) {
            size = new_size;
            target = Framebuffer::new();
            target.init(size, config.multisample)?;
        }

        let shade = (frame % 240) as f32 / 240.0;
        GlErrorGuard::guard_named("demo frame", || {
            target.activate();
            unsafe {
                gl::ClearColor(shade, 0.2, 1.0 - shade, 1.0);
                gl::Clear(gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT);
            }
            target.deactivate();
            target.blit_to_default(size);
        });

        window.swap_buffers();
        glfw::poll_events();
        frame = frame.wrapping_add(1);
    }

    drop((target, vertices, indices));
    drop(window);
    glfw::terminate();
    Ok(())
}
