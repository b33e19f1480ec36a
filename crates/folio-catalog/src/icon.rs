//! Symbolic icon names
//!
//! Records carry a glyph name as plain text. The presentation layer resolves it
//! through [`ProjectIcon`], a closed set with a fixed fallback.

use std::fmt;

/// Glyph name used when a record has no icon or an unknown one
pub const DEFAULT_ICON_NAME: &str = "Code2";

/// Renderable glyph variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProjectIcon {
    /// Generic code glyph
    #[default]
    Code2,
    /// Phone
    Smartphone,
    /// Lightning bolt
    Zap,
    /// Rising chart line
    TrendingUp,
    /// Shopping cart
    ShoppingCart,
    /// Pulse line
    Activity,
    /// Connected nodes
    Network,
    /// Bar chart
    BarChart3,
    /// Globe
    Globe,
    /// Server rack
    Server,
    /// Database cylinder
    Database,
    /// Rocket
    Rocket,
    /// Briefcase
    Briefcase,
}

impl ProjectIcon {
    /// Every variant
    pub const ALL: [Self; 13] = [
        Self::Code2,
        Self::Smartphone,
        Self::Zap,
        Self::TrendingUp,
        Self::ShoppingCart,
        Self::Activity,
        Self::Network,
        Self::BarChart3,
        Self::Globe,
        Self::Server,
        Self::Database,
        Self::Rocket,
        Self::Briefcase,
    ];

    /// Resolve a symbolic name; unknown or blank names give [`ProjectIcon::Code2`]
    #[must_use]
    pub fn resolve(name: &str) -> Self {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|icon| icon.name() == name)
            .unwrap_or_default()
    }

    /// Symbolic name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Code2 => DEFAULT_ICON_NAME,
            Self::Smartphone => "Smartphone",
            Self::Zap => "Zap",
            Self::TrendingUp => "TrendingUp",
            Self::ShoppingCart => "ShoppingCart",
            Self::Activity => "Activity",
            Self::Network => "Network",
            Self::BarChart3 => "BarChart3",
            Self::Globe => "Globe",
            Self::Server => "Server",
            Self::Database => "Database",
            Self::Rocket => "Rocket",
            Self::Briefcase => "Briefcase",
        }
    }
}

impl fmt::Display for ProjectIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
