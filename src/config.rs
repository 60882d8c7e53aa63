//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`PF_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::path::Path;

use field_core::{FieldConfig, LinkConfig, PoolLimit};
use field_math::Rgba;
use field_render::{RenderConfig, RenderLayers};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Window configuration
    #[serde(default)]
    pub window: WindowConfig,
    /// Particle pool configuration
    #[serde(default)]
    pub field: FieldSettings,
    /// Connection line configuration
    #[serde(default)]
    pub links: LinkSettings,
    /// Rendering configuration
    #[serde(default)]
    pub rendering: RenderingConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`PF_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // PF_FIELD__MAX_PARTICLES=80 -> field.max_particles = 80
        figment = figment.merge(Env::prefixed("PF_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }

    /// Engine parameters for the particle pool
    pub fn to_field_config(&self) -> FieldConfig {
        FieldConfig {
            max_particles: self.field.max_particles,
            area_per_particle: self.field.area_per_particle,
            max_speed: self.field.max_speed,
            radius_range: self.field.radius_range,
            lifespan_range: self.field.lifespan_range,
            max_opacity: self.field.max_opacity,
            pointer_spawn_chance: self.field.pointer_spawn_chance,
            pool_limit: PoolLimit::from_count(self.field.pool_limit),
            links: LinkConfig {
                max_distance: self.links.max_distance,
                max_alpha: self.links.max_alpha,
            },
        }
    }

    /// Styling for the renderer
    pub fn to_render_config(&self) -> RenderConfig {
        let mut layers = RenderLayers::empty();
        layers.set(RenderLayers::LINKS, self.links.enabled);
        layers.set(RenderLayers::PARTICLES, self.rendering.particles);
        layers.set(RenderLayers::GLOW, self.rendering.glow);

        RenderConfig {
            link_color: Rgba::from_hex(self.links.color),
            link_width: self.links.width,
            glow_blur: self.rendering.glow_blur,
            glow_scale: self.rendering.glow_scale,
            layers,
        }
    }
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Window width in logical pixels
    pub width: u32,
    /// Window height in logical pixels
    pub height: u32,
    /// Start in fullscreen mode
    pub fullscreen: bool,
    /// Enable VSync
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Particle Field".to_string(),
            width: 1280,
            height: 720,
            fullscreen: false,
            vsync: true,
        }
    }
}

/// Particle pool configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldSettings {
    /// Upper bound on the pool size after (re)initialization
    pub max_particles: usize,
    /// Surface area per particle when sizing the pool
    pub area_per_particle: f32,
    /// Per-axis speed bound (units per frame)
    pub max_speed: f32,
    /// Radius range [min, max)
    pub radius_range: [f32; 2],
    /// Lifespan range in frames [min, max)
    pub lifespan_range: [u32; 2],
    /// Opacity of a newborn particle
    pub max_opacity: f32,
    /// Probability that a pointer move injects a particle
    pub pointer_spawn_chance: f32,
    /// Hard cap on pool size under pointer injection; `0` for no cap
    pub pool_limit: usize,
    /// Fixed random seed for reproducible runs
    pub seed: Option<u64>,
}

impl Default for FieldSettings {
    fn default() -> Self {
        Self {
            max_particles: 50,
            area_per_particle: 10_000.0,
            max_speed: 0.25,
            radius_range: [0.5, 2.5],
            lifespan_range: [100, 300],
            max_opacity: 0.5,
            pointer_spawn_chance: 0.1,
            pool_limit: 150,
            seed: None,
        }
    }
}

/// Connection line configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkSettings {
    /// Draw connection lines
    pub enabled: bool,
    /// Pairs at or beyond this distance are not connected
    pub max_distance: f32,
    /// Alpha of a link between coincident particles
    pub max_alpha: f32,
    /// Stroke colour as 0xRRGGBB
    pub color: u32,
    /// Stroke width
    pub width: f32,
}

impl Default for LinkSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            max_distance: 100.0,
            max_alpha: 0.1,
            color: 0x00f0ff,
            width: 0.5,
        }
    }
}

/// Rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderingConfig {
    /// Background color behind the transparent canvas [r, g, b, a]
    pub background_color: [f32; 4],
    /// Draw particle disks
    pub particles: bool,
    /// Draw the blurred glow
    pub glow: bool,
    /// Shadow blur of the glow
    pub glow_blur: f32,
    /// Glow disk radius relative to the particle radius
    pub glow_scale: f32,
}

impl Default for RenderingConfig {
    fn default() -> Self {
        Self {
            background_color: [0.02, 0.02, 0.05, 1.0],
            particles: true,
            glow: true,
            glow_blur: 10.0,
            glow_scale: 0.5,
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Show particle count and frame rate in the window title
    pub show_stats: bool,
    /// Log level (error, warn, info, debug, trace); `RUST_LOG` takes precedence
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            show_stats: false,
            log_level: "info".to_string(),
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.window.width, 1280);
        assert_eq!(config.field.max_particles, 50);
        assert_eq!(config.field.pool_limit, 150);
    }

    #[test]
    fn test_defaults_match_engine_defaults() {
        let config = AppConfig::default();
        let field = config.to_field_config();
        let engine = FieldConfig::default();
        assert_eq!(field.max_particles, engine.max_particles);
        assert_eq!(field.area_per_particle, engine.area_per_particle);
        assert_eq!(field.max_speed, engine.max_speed);
        assert_eq!(field.radius_range, engine.radius_range);
        assert_eq!(field.lifespan_range, engine.lifespan_range);
        assert_eq!(field.max_opacity, engine.max_opacity);
        assert_eq!(field.pool_limit, engine.pool_limit);
        assert_eq!(field.links, engine.links);

        let render = config.to_render_config();
        assert_eq!(render.link_color.to_hex(), 0x00f0ff);
        assert_eq!(render.layers, RenderLayers::all());
    }

    #[test]
    fn test_zero_pool_limit_is_unbounded() {
        let mut config = AppConfig::default();
        config.field.pool_limit = 0;
        assert_eq!(config.to_field_config().pool_limit, PoolLimit::Unbounded);
    }

    #[test]
    fn test_omitted_pool_limit_keeps_cap() {
        let config: AppConfig = toml::from_str("[field]\nmax_particles = 80\n").unwrap();
        assert_eq!(config.to_field_config().pool_limit, PoolLimit::Capped(150));
    }

    #[test]
    fn test_disabled_layers() {
        let mut config = AppConfig::default();
        config.links.enabled = false;
        config.rendering.glow = false;
        assert_eq!(config.to_render_config().layers, RenderLayers::PARTICLES);
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("title"));
        assert!(toml.contains("max_particles"));
        assert!(toml.contains("area_per_particle"));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: AppConfig = toml::from_str("[field]\nmax_particles = 80\n").unwrap();
        assert_eq!(config.field.max_particles, 80);
        assert_eq!(config.field.max_speed, 0.25);
        assert_eq!(config.window.title, "Particle Field");
    }
}
