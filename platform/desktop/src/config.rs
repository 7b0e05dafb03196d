use euclid::default::Size2D;

/// How the window is created, fixed for the lifetime of the process.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WindowConfig {
    pub title: String,
    /// Initial client width, in physical pixels.
    pub width: u32,
    /// Initial client height, in physical pixels.
    pub height: u32,
    /// Wait for the vertical blank before presenting.
    pub vsync: bool,
    /// Append the frame rate to the title, refreshed once per second.
    pub show_fps: bool,
}

impl WindowConfig {
    pub fn new(title: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            title: title.into(),
            width,
            height,
            ..Default::default()
        }
    }

    /// The configuration of the line drawer window.
    pub fn line_drawer() -> Self {
        Self::new("LineDrawer", 1024, 768)
    }

    pub const fn size(&self) -> Size2D<u32> {
        Size2D::new(self.width, self.height)
    }

    pub fn fps_title(&self, fps: f64) -> String {
        format!("{} - FPS: {fps:.1}", self.title)
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Powered by wgpu".to_string(),
            width: 800,
            height: 600,
            vsync: false,
            show_fps: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_drawer_defaults() {
        let config = WindowConfig::line_drawer();
        assert_eq!(config.title, "LineDrawer");
        assert_eq!(config.size(), Size2D::new(1024, 768));
        assert!(!config.vsync);
        assert!(config.show_fps);
    }

    #[test]
    fn fps_is_shown_with_one_decimal() {
        let config = WindowConfig::line_drawer();
        assert_eq!(config.fps_title(59.94), "LineDrawer - FPS: 59.9");
        assert_eq!(config.fps_title(60.), "LineDrawer - FPS: 60.0");
    }
}
