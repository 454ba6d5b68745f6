use std::{env, path::PathBuf, str::FromStr};

use eyre::{eyre, Result};

/// Settings of the demo window, overridable through `VOXGL_*` environment variables
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
    pub vertex_shader: PathBuf,
    pub fragment_shader: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: "voxgl".to_owned(),
            width: 1280,
            height: 720,
            vsync: true,
            vertex_shader: PathBuf::from("shaders/voxel.vert"),
            fragment_shader: PathBuf::from("shaders/voxel.frag"),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Start from the defaults and apply every variable `lookup` knows about
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(title) = lookup("VOXGL_TITLE") {
            config.title = title;
        }
        if let Some(width) = parse(&lookup, "VOXGL_WIDTH")? {
            config.width = width;
        }
        if let Some(height) = parse(&lookup, "VOXGL_HEIGHT")? {
            config.height = height;
        }
        if let Some(vsync) = parse(&lookup, "VOXGL_VSYNC")? {
            config.vsync = vsync;
        }
        if let Some(path) = lookup("VOXGL_VERTEX_SHADER") {
            config.vertex_shader = path.into();
        }
        if let Some(path) = lookup("VOXGL_FRAGMENT_SHADER") {
            config.fragment_shader = path.into();
        }

        if config.width == 0 || config.height == 0 {
            return Err(eyre!(
                "window size must be non-zero, got {}x{}",
                config.width,
                config.height
            ));
        }

        Ok(config)
    }
}

fn parse<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| eyre!("invalid value '{raw}' for {key}: {e}")),
        None => Ok(None),
    }
}
