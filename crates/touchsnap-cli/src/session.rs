//! Recorded snap sessions: a view, a scene and the pointer samples to replay.

use anyhow::{Context, Result, bail};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::path::Path;
use touchsnap_core::{
    ActiveShape, CanvasDocument, Shape, ShapeId, SnapKind, SnapOptions, SnapRequest, SnappedHandle, SnappedPoint,
    Snapper, Viewport,
};

/// A replayable session file.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(default)]
    pub viewport: Viewport,
    #[serde(default)]
    pub options: Option<SnapOptions>,
    /// Scene as a list of shapes in back-to-front order.
    #[serde(default)]
    pub shapes: Vec<Shape>,
    /// Scene as a saved document; takes precedence over `shapes`.
    #[serde(default)]
    pub document: Option<CanvasDocument>,
    pub samples: Vec<Sample>,
}

/// One pointer position to snap.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sample {
    pub point: Point,
    /// Shape being drawn (not part of the scene).
    #[serde(default)]
    pub drawing: Option<Shape>,
    /// Scene shape being moved or reshaped.
    #[serde(default)]
    pub moving: Option<ShapeId>,
    #[serde(default)]
    pub hot_handle: Option<usize>,
    #[serde(default)]
    pub ignore_handle: Option<usize>,
    #[serde(default)]
    pub ignore_ids: Option<Vec<ShapeId>>,
    /// Clear the snap feedback after this sample.
    #[serde(default)]
    pub clear: bool,
}

/// Outcome of one sample.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleResult {
    pub input: Point,
    pub point: Point,
    pub kind: SnapKind,
    pub snapped: SnappedPoint,
    pub handle: Option<SnappedHandle>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub cleared: bool,
}

impl Session {
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).with_context(|| format!("reading session {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("parsing session {}", path.display()))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let session: Self = serde_json::from_str(json)?;
        if let Some(options) = &session.options {
            options.validate()?;
        }
        Ok(session)
    }

    /// Take the scene out of the session.
    pub fn document(&mut self) -> CanvasDocument {
        match self.document.take() {
            Some(document) => document,
            None => std::mem::take(&mut self.shapes).into_iter().collect(),
        }
    }
}

/// Run every sample through one snapper, in order.
pub fn replay(mut session: Session, options: Option<SnapOptions>) -> Result<Vec<SampleResult>> {
    let options = options.or_else(|| session.options.clone()).unwrap_or_default();
    let document = session.document();
    let viewport = session.viewport;
    let mut snapper = Snapper::with_options(options);
    log::info!("replaying {} samples against {} shapes", session.samples.len(), document.len());

    let mut results = Vec::with_capacity(session.samples.len());
    for (index, sample) in session.samples.iter().enumerate() {
        let active = match (&sample.drawing, sample.moving) {
            (Some(_), Some(_)) => bail!("sample {index}: `drawing` and `moving` are exclusive"),
            (Some(shape), None) => Some(ActiveShape::drawing(shape)),
            (None, Some(id)) => {
                let shape = document
                    .get_shape(id)
                    .with_context(|| format!("sample {index}: no shape {id} in the scene"))?;
                Some(ActiveShape::existing(shape))
            }
            (None, None) => None,
        };

        let mut request = SnapRequest::new(sample.point);
        request.active = active;
        request.hot_handle = sample.hot_handle;
        request.ignore_handle = sample.ignore_handle;
        request.ignore_ids = sample.ignore_ids.as_deref();

        let point = snapper.snap_point(&viewport, &document, &request);
        let mut result = SampleResult {
            input: sample.point,
            point,
            kind: snapper.snapped_type(),
            snapped: snapper.snapped_point(),
            handle: snapper.snapped_handle(),
            cleared: false,
        };
        if sample.clear {
            result.cleared = snapper.clear_snap(&viewport);
        }
        results.push(result);
    }
    Ok(results)
}
