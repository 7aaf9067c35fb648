//! Static page content: hero line, skills, projects, experience.
//!
//! All content is literal data baked into the binary. Nothing here mutates at
//! runtime; the CLI's `show` command and any future page shell just read it.

pub const NAME: &str = "Raghav Menon";
pub const TAGLINE: &str = "Systems engineer building fast, quietly reliable software.";

pub const ABOUT: &str = "I spend most of my time close to the metal: renderers, \
audio pipelines, and the tooling that keeps them honest. Previously shipped \
real-time graphics for broadcast, now focused on GPU compute and developer \
experience. Ask me about profiling, or mentoring people into systems work.";

pub const SKILLS: &[&str] = &[
    "Rust",
    "WebGPU",
    "WGSL",
    "C++",
    "Vulkan",
    "TypeScript",
    "Real-time rendering",
    "DSP",
    "Profiling",
    "CI tooling",
];

/// A portfolio project entry.
#[derive(Clone, Copy, Debug)]
pub struct Project {
    pub name: &'static str,
    pub description: &'static str,
    pub stack: &'static [&'static str],
    pub link: &'static str,
}

pub const PROJECTS: &[Project] = &[
    Project {
        name: "prismseq",
        description: "Audio-reactive sequencer visualiser with offline frame export.",
        stack: &["Rust", "wgpu", "WGSL"],
        link: "https://github.com/rmenon/prismseq",
    },
    Project {
        name: "voxelight",
        description: "Tiny voxel global-illumination playground running in the browser.",
        stack: &["Rust", "WebGPU", "wasm"],
        link: "https://github.com/rmenon/voxelight",
    },
    Project {
        name: "tracewrangler",
        description: "Flamegraph diffing tool for chasing frame-time regressions.",
        stack: &["Rust", "TypeScript"],
        link: "https://github.com/rmenon/tracewrangler",
    },
    Project {
        name: "chai-cam",
        description: "Raspberry Pi timelapse rig for the office chai station.",
        stack: &["Rust", "ffmpeg"],
        link: "https://github.com/rmenon/chai-cam",
    },
];

/// One entry in the experience timeline.
#[derive(Clone, Copy, Debug)]
pub struct ExperienceEntry {
    pub role: &'static str,
    pub organization: &'static str,
    pub period: &'static str,
    pub summary: &'static str,
}

pub const EXPERIENCE: &[ExperienceEntry] = &[
    ExperienceEntry {
        role: "Senior Graphics Engineer",
        organization: "Lumen Broadcast Labs",
        period: "2022 - present",
        summary: "Own the real-time compositing renderer; shipped the GPU particle \
                  and feedback systems used on air.",
    },
    ExperienceEntry {
        role: "Rendering Engineer",
        organization: "Studio Kanvas",
        period: "2019 - 2022",
        summary: "Built the in-house Vulkan scene pipeline and the profiling \
                  harness that kept it at 60fps.",
    },
    ExperienceEntry {
        role: "Software Engineer",
        organization: "Tessel Systems",
        period: "2016 - 2019",
        summary: "Embedded DSP and firmware for audio capture hardware.",
    },
];

// ============================================================================
// Formatting for terminal output
// ============================================================================

pub fn format_about() -> String {
    format!("{}\n{}\n\n{}\n", NAME, TAGLINE, ABOUT)
}

pub fn format_skills() -> String {
    SKILLS.join(", ")
}

pub fn format_projects() -> String {
    let mut out = String::new();
    for project in PROJECTS {
        out.push_str(&format!(
            "{} [{}]\n  {}\n  {}\n",
            project.name,
            project.stack.join(", "),
            project.description,
            project.link
        ));
    }
    out
}

pub fn format_experience() -> String {
    let mut out = String::new();
    for entry in EXPERIENCE {
        out.push_str(&format!(
            "{} - {} ({})\n  {}\n",
            entry.role, entry.organization, entry.period, entry.summary
        ));
    }
    out
}
