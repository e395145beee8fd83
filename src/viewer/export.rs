use crate::viewer::console::SavedFormsViewer;

// Full, untruncated views of the store.

impl SavedFormsViewer {
    pub fn render_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.forms())
    }

    pub fn render_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(&self.forms())
    }

    /// Render in `format` ("json", "yaml"; anything else is console text).
    pub fn render_as(&self, format: &str) -> Result<String, Box<dyn std::error::Error>> {
        let out = match format {
            "json" => {
                let mut json = self.render_json()?;
                json.push('\n');
                json
            }
            "yaml" => self.render_yaml()?,
            _ => self.render(),
        };
        Ok(out)
    }
}
