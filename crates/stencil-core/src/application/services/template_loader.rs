//! Loading scaffold templates from an [`AssetSource`].

use tracing::{debug, instrument};

use crate::{
    application::ports::AssetSource,
    domain::{AssetTemplate, ProjectOptions, ProjectType, RelativePath},
    error::StencilResult,
};

impl ProjectType {
    /// Read every asset selected by `options`, in manifest order.
    ///
    /// Any missing asset aborts loading; no partial set is returned.
    #[instrument(skip_all, fields(project_type = %self, source = %source.describe()))]
    pub fn load_templates(
        self,
        source: &dyn AssetSource,
        options: &ProjectOptions,
    ) -> StencilResult<Vec<AssetTemplate>> {
        self.selected_assets(options)
            .into_iter()
            .map(|spec| -> StencilResult<AssetTemplate> {
                let content = source.read(self.asset_dir(), spec.asset_file)?;
                debug!(asset = spec.asset_file, bytes = content.len(), "Asset loaded");
                Ok(AssetTemplate::new(
                    spec.name,
                    RelativePath::try_new(spec.target)?,
                    content,
                ))
            })
            .collect()
    }
}
