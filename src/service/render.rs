use serde::{Deserialize, Serialize};

use crate::encode::sink::{OutputFormat, OutputSink, encode_frame};
use crate::render::compositor::{Compositor, ElementFailure};
use crate::scene::model::StoryDataDef;
use crate::scene::slide::{RejectedElement, Scene};

/// Service name reported by the health payload.
pub const SERVICE_NAME: &str = "Stories Generator";

/// Body of a render request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RenderRequest {
    /// Envelope carrying the story.
    #[serde(default)]
    pub metadata: RenderMetadata,
}

/// `metadata` envelope of a render request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RenderMetadata {
    /// Authored story.
    #[serde(rename = "storyData", default)]
    pub story_data: Option<StoryDataDef>,
}

/// One stored slide raster.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedImage {
    /// Index of the slide in the request.
    pub slide_index: usize,
    /// Where the sink stored the raster.
    pub image_url: String,
    /// Display duration in seconds.
    pub duration: f64,
}

/// Recoverable problems encountered while rendering one slide.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideDiagnostics {
    /// Index of the slide in the request.
    pub slide_index: usize,
    /// Set when the background fell back to black.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_fallback: Option<String>,
    /// Elements that failed to paint.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failed_elements: Vec<ElementFailure>,
    /// Elements rejected while reading the payload.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rejected_elements: Vec<RejectedElement>,
    /// Set when the slide rendered but could not be encoded or stored.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_error: Option<String>,
}

impl SlideDiagnostics {
    fn is_empty(&self) -> bool {
        self.background_fallback.is_none()
            && self.failed_elements.is_empty()
            && self.rejected_elements.is_empty()
            && self.store_error.is_none()
    }
}

/// Successful render payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderSuccess {
    /// Always `true`.
    pub success: bool,
    /// Stored rasters in slide order.
    pub images: Vec<RenderedImage>,
    /// Slides in the request.
    pub total_slides: usize,
    /// Rasters stored.
    pub generated_count: usize,
    /// Per-slide problems, only for slides that had any.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<SlideDiagnostics>,
}

/// Failed render payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderFailure {
    /// Human-readable error.
    pub error: String,
    /// HTTP-style status for the network collaborator.
    #[serde(skip)]
    pub status: u16,
}

/// Outcome of [`handle_render_request`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RenderResponse {
    /// At least one slide was stored.
    Success(RenderSuccess),
    /// Nothing was stored.
    Failure(RenderFailure),
}

impl RenderResponse {
    fn failure(status: u16, error: impl Into<String>) -> Self {
        Self::Failure(RenderFailure {
            error: error.into(),
            status,
        })
    }

    /// HTTP-style status: 200, 400 for bad input, 500 when no slide rendered.
    pub fn status(&self) -> u16 {
        match self {
            Self::Success(_) => 200,
            Self::Failure(f) => f.status,
        }
    }
}

/// Health probe payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    /// Always `"OK"`.
    pub status: &'static str,
    /// Service name.
    pub service: &'static str,
}

impl HealthResponse {
    /// Healthy payload.
    pub fn ok() -> Self {
        Self {
            status: "OK",
            service: SERVICE_NAME,
        }
    }
}

/// Render every slide of a JSON render request and store each raster through `sink`.
pub fn handle_render_request(
    body: &[u8],
    compositor: &Compositor,
    sink: &mut dyn OutputSink,
    format: OutputFormat,
) -> RenderResponse {
    let req: RenderRequest = match serde_json::from_slice(body) {
        Ok(r) => r,
        Err(e) => return RenderResponse::failure(400, format!("invalid render request: {e}")),
    };
    let Some(story) = req.metadata.story_data.filter(|s| !s.slides.is_empty()) else {
        return RenderResponse::failure(400, "no slides found in metadata");
    };
    let scene = match Scene::from_def(&story, &compositor.config().scene) {
        Ok(s) => s,
        Err(e) => return RenderResponse::failure(400, e.to_string()),
    };

    let slides = scene.slides();
    let rendered = compositor.render_slides(slides);
    let mut images = Vec::with_capacity(slides.len());
    let mut diagnostics = Vec::new();
    for (i, (slide, out)) in slides.iter().zip(rendered).enumerate() {
        let mut diag = SlideDiagnostics {
            slide_index: i,
            background_fallback: out.background_fallback,
            failed_elements: out.failures,
            rejected_elements: slide.rejected().to_vec(),
            store_error: None,
        };
        match encode_frame(&out.frame, format).and_then(|bytes| sink.store(i, format, &bytes)) {
            Ok(image_url) => images.push(RenderedImage {
                slide_index: i,
                image_url,
                duration: slide.duration(),
            }),
            Err(e) => {
                tracing::warn!(slide = i, error = %e, "slide not stored");
                diag.store_error = Some(e.to_string());
            }
        }
        if !diag.is_empty() {
            diagnostics.push(diag);
        }
    }

    if images.is_empty() {
        return RenderResponse::failure(500, "no slide could be rendered");
    }
    tracing::info!(
        total = slides.len(),
        generated = images.len(),
        "render request complete"
    );
    RenderResponse::Success(RenderSuccess {
        success: true,
        generated_count: images.len(),
        total_slides: slides.len(),
        images,
        diagnostics,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/service/render.rs"]
mod tests;
