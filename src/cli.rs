use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::app;
use crate::backdrop::Backdrop;
use crate::config::BackdropConfig;
use crate::contact::{ContactForm, Purpose};
use crate::content;
use crate::gpu::renderer::Renderer;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the animated backdrop in a window
    View {
        /// Window width in pixels
        #[arg(long, default_value_t = 1280)]
        width: u32,

        /// Window height in pixels
        #[arg(long, default_value_t = 720)]
        height: u32,

        /// JSON file overriding backdrop defaults
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Render backdrop frames to disk
    Render {
        /// Output directory for frames
        #[arg(long)]
        out: PathBuf,

        /// Number of frames to render
        #[arg(long, default_value_t = 300)]
        frames: u32,

        /// Output width
        #[arg(long, default_value_t = 800)]
        width: u32,

        /// Output height
        #[arg(long, default_value_t = 600)]
        height: u32,

        /// Cursor x in pixels, held for the whole render
        #[arg(long, requires = "pointer_y")]
        pointer_x: Option<f32>,

        /// Cursor y in pixels, held for the whole render
        #[arg(long, requires = "pointer_x")]
        pointer_y: Option<f32>,

        /// JSON file overriding backdrop defaults
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Render a single frame after stepping the animation
    Snapshot {
        /// Output PNG path (defaults to a timestamped name)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Animation steps to run before capturing
        #[arg(long, default_value_t = 0)]
        steps: u32,

        /// Output width
        #[arg(long, default_value_t = 800)]
        width: u32,

        /// Output height
        #[arg(long, default_value_t = 600)]
        height: u32,

        /// JSON file overriding backdrop defaults
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Compose the WhatsApp contact link and open it
    Contact {
        /// Sender name
        #[arg(long)]
        name: String,

        /// Reason for reaching out
        #[arg(long, value_enum, default_value_t = Purpose::Mentorship)]
        purpose: Purpose,

        /// Message text
        #[arg(long)]
        message: String,

        /// Print the link instead of opening a browser
        #[arg(long)]
        dry_run: bool,
    },

    /// Print a content section
    Show {
        #[arg(value_enum)]
        section: Section,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Section {
    About,
    Skills,
    Projects,
    Experience,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::View {
            width,
            height,
            config,
        } => {
            let config = load_config(config.as_deref())?;
            app::run(config, width, height)?;
        }
        Commands::Render {
            out,
            frames,
            width,
            height,
            pointer_x,
            pointer_y,
            config,
        } => {
            let config = load_config(config.as_deref())?;
            let pointer = pointer_x.zip(pointer_y);
            pollster::block_on(render_offline(config, out, frames, width, height, pointer))?;
        }
        Commands::Snapshot {
            out,
            steps,
            width,
            height,
            config,
        } => {
            let config = load_config(config.as_deref())?;
            let path = out.unwrap_or_else(|| {
                PathBuf::from(format!(
                    "snapshot_{}.png",
                    chrono::Local::now().format("%Y%m%d_%H%M%S")
                ))
            });
            pollster::block_on(render_snapshot(config, path, steps, width, height))?;
        }
        Commands::Contact {
            name,
            purpose,
            message,
            dry_run,
        } => {
            let mut form = ContactForm::new();
            form.set_name(name);
            form.set_purpose(purpose);
            form.set_message(message);

            if dry_run {
                println!("{}", form.whatsapp_url()?);
            } else {
                let url = form.submit()?;
                println!("Opened {}", url);
            }
        }
        Commands::Show { section } => {
            let text = match section {
                Section::About => content::format_about(),
                Section::Skills => content::format_skills(),
                Section::Projects => content::format_projects(),
                Section::Experience => content::format_experience(),
            };
            println!("{}", text);
        }
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<BackdropConfig> {
    let Some(path) = path else {
        return Ok(BackdropConfig::default());
    };

    let mut contents = String::new();
    File::open(path)
        .with_context(|| format!("failed to open config file {:?}", path))?
        .read_to_string(&mut contents)?;
    let config = serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse config file {:?}", path))?;
    Ok(config)
}

/// Offscreen render target with a mappable readback buffer.
struct OffscreenTarget {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    output_buffer: wgpu::Buffer,
    padded_bytes_per_row: u32,
    width: u32,
    height: u32,
}

impl OffscreenTarget {
    fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Target Texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        // Rows must be padded to 256 bytes for texture-to-buffer copies
        let u32_size = std::mem::size_of::<u32>() as u32;
        let unpadded_bytes_per_row = u32_size * width;
        let align = 256;
        let padded_bytes_per_row =
            unpadded_bytes_per_row + (align - unpadded_bytes_per_row % align) % align;

        let output_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Output Buffer"),
            size: (padded_bytes_per_row * height) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        Self {
            texture,
            view,
            output_buffer,
            padded_bytes_per_row,
            width,
            height,
        }
    }

    /// Copy the last rendered frame out of the texture and save it as a PNG.
    fn save_frame(&self, renderer: &Renderer, path: &Path) -> Result<()> {
        let mut encoder = renderer
            .device()
            .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: None });

        encoder.copy_texture_to_buffer(
            wgpu::ImageCopyTexture {
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::ImageCopyBuffer {
                buffer: &self.output_buffer,
                layout: wgpu::ImageDataLayout {
                    offset: 0,
                    bytes_per_row: Some(self.padded_bytes_per_row),
                    rows_per_image: Some(self.height),
                },
            },
            wgpu::Extent3d {
                width: self.width,
                height: self.height,
                depth_or_array_layers: 1,
            },
        );

        renderer.queue().submit(Some(encoder.finish()));

        let buffer_slice = self.output_buffer.slice(..);
        let (tx, rx) = std::sync::mpsc::channel();
        buffer_slice.map_async(wgpu::MapMode::Read, move |v| tx.send(v).unwrap());
        renderer.device().poll(wgpu::Maintain::Wait);
        rx.recv()??;

        let data = buffer_slice.get_mapped_range();

        // Strip row padding
        let mut unpadded_data = Vec::with_capacity((self.width * self.height * 4) as usize);
        for row in 0..self.height {
            let start = (row * self.padded_bytes_per_row) as usize;
            let end = start + (self.width * 4) as usize;
            unpadded_data.extend_from_slice(&data[start..end]);
        }

        image::save_buffer(
            path,
            &unpadded_data,
            self.width,
            self.height,
            image::ColorType::Rgba8,
        )?;

        drop(data);
        self.output_buffer.unmap();
        Ok(())
    }
}

async fn headless_renderer(
    config: BackdropConfig,
    width: u32,
    height: u32,
) -> Result<(Backdrop, Renderer, OffscreenTarget)> {
    if width == 0 || height == 0 {
        return Err(anyhow::anyhow!(
            "output size must be at least 1x1, got {}x{}",
            width,
            height
        ));
    }

    let instance = wgpu::Instance::new(wgpu::InstanceDescriptor::default());
    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: None, // Headless
            force_fallback_adapter: false,
        })
        .await
        .ok_or_else(|| anyhow::anyhow!("No adapter found"))?;

    let (device, queue) = adapter
        .request_device(&wgpu::DeviceDescriptor::default(), None)
        .await?;
    let device = Arc::new(device);
    let queue = Arc::new(queue);

    let target = OffscreenTarget::new(&device, width, height);
    let backdrop = Backdrop::new(config, width, height);
    let renderer = Renderer::new(
        device,
        queue,
        wgpu::TextureFormat::Rgba8UnormSrgb,
        &backdrop,
    );

    Ok((backdrop, renderer, target))
}

async fn render_offline(
    config: BackdropConfig,
    out_dir: PathBuf,
    frames: u32,
    width: u32,
    height: u32,
    pointer: Option<(f32, f32)>,
) -> Result<()> {
    std::fs::create_dir_all(&out_dir)?;

    let (mut backdrop, mut renderer, target) = headless_renderer(config, width, height).await?;
    if let Some((x, y)) = pointer {
        backdrop.on_pointer_move(x, y);
    }

    println!("Rendering {} frames to {:?}...", frames, out_dir);

    for i in 0..frames {
        backdrop.step();
        renderer.render(&target.view, &backdrop);

        let frame_path = out_dir.join(format!("frame_{:05}.png", i));
        target.save_frame(&renderer, &frame_path)?;

        if i % 60 == 0 {
            print!(".");
            use std::io::Write;
            std::io::stdout().flush()?;
        }
    }
    println!("\nDone.");

    Ok(())
}

async fn render_snapshot(
    config: BackdropConfig,
    path: PathBuf,
    steps: u32,
    width: u32,
    height: u32,
) -> Result<()> {
    let (mut backdrop, mut renderer, target) = headless_renderer(config, width, height).await?;

    for _ in 0..steps {
        backdrop.step();
    }
    renderer.render(&target.view, &backdrop);
    target.save_frame(&renderer, &path)?;

    println!("Saved {:?}", path);
    Ok(())
}
