use crate::{
    animation::track::Track,
    foundation::core::Vec2,
    foundation::error::{StageError, StageResult},
    preload::manifest::AssetManifest,
    timeline::model::{Panel, PanelProps, Stage, VisibilityBand},
};

pub struct StageBuilder {
    cta: VisibilityBand,
    hint_fade: Track<f64>,
    manifest: AssetManifest,
    panels: Vec<Panel>,
}

impl StageBuilder {
    pub fn new(cta: VisibilityBand) -> Self {
        Self {
            cta,
            hint_fade: Track::constant(0.0),
            manifest: AssetManifest::default(),
            panels: Vec::new(),
        }
    }

    pub fn hint_fade(mut self, track: Track<f64>) -> Self {
        self.hint_fade = track;
        self
    }

    pub fn manifest(mut self, manifest: AssetManifest) -> Self {
        self.manifest = manifest;
        self
    }

    pub fn panel(mut self, panel: Panel) -> Self {
        self.panels.push(panel);
        self
    }

    pub fn build(self) -> StageResult<Stage> {
        let stage = Stage {
            panels: self.panels,
            cta: self.cta,
            hint_fade: self.hint_fade,
            manifest: self.manifest,
        };
        stage.validate()?;
        Ok(stage)
    }
}

pub struct PanelBuilder {
    id: String,
    z: i32,
    props: PanelProps,
}

impl PanelBuilder {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            z: 0,
            props: PanelProps::default(),
        }
    }

    pub fn z(mut self, z: i32) -> Self {
        self.z = z;
        self
    }

    pub fn opacity(mut self, track: Track<f64>) -> Self {
        self.props.opacity = track;
        self
    }

    pub fn translate(mut self, track: Track<Vec2>) -> Self {
        self.props.translate = track;
        self
    }

    pub fn scale(mut self, track: Track<f64>) -> Self {
        self.props.scale = track;
        self
    }

    pub fn rotation_deg(mut self, track: Track<f64>) -> Self {
        self.props.rotation_deg = track;
        self
    }

    pub fn blur_px(mut self, track: Track<f64>) -> Self {
        self.props.blur_px = track;
        self
    }

    pub fn anchor(mut self, anchor: Vec2) -> Self {
        self.props.anchor = anchor;
        self
    }

    pub fn build(self) -> StageResult<Panel> {
        if self.id.trim().is_empty() {
            return Err(StageError::validation("panel id must be non-empty"));
        }
        self.props.opacity.validate()?;
        self.props.translate.validate()?;
        self.props.scale.validate()?;
        self.props.rotation_deg.validate()?;
        self.props.blur_px.validate()?;

        Ok(Panel {
            id: self.id,
            z: self.z,
            props: self.props,
        })
    }
}
