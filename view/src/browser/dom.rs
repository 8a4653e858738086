//! `web-sys` render targets: text elements, the press canvas and radio groups.

use std::f64::consts::TAU;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlInputElement};

use crate::config::{ElementIds, PressStyle, ViewConfig};
use crate::error::ViewError;
use crate::outbound::RadioGroups;
use crate::press::{PaintOp, Painter, paint_press};
use crate::surface::{TextSlot, ViewSurface};

pub(crate) fn js_error(err: JsValue) -> ViewError {
    ViewError::Js(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

pub(crate) fn document() -> Result<Document, ViewError> {
    web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| ViewError::Js("no window.document".to_owned()))
}

/// Look up the press canvas, size it, and take its 2D context.
fn open_canvas(document: &Document, id: &str, size: f64) -> Result<CanvasRenderingContext2d, ViewError> {
    let canvas = document
        .get_element_by_id(id)
        .ok_or_else(|| ViewError::MissingElement(id.to_owned()))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| ViewError::NoCanvas(id.to_owned()))?;

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let side = size.round() as u32;
    canvas.set_width(side);
    canvas.set_height(side);

    canvas
        .get_context("2d")
        .map_err(js_error)?
        .ok_or_else(|| ViewError::NoCanvas(id.to_owned()))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| ViewError::NoCanvas(id.to_owned()))
}

struct CanvasPainter<'a>(&'a CanvasRenderingContext2d);

impl Painter for CanvasPainter<'_> {
    fn apply(&mut self, op: &PaintOp) -> Result<(), ViewError> {
        let ctx = self.0;
        match op {
            PaintOp::Clear { width, height } => ctx.clear_rect(0.0, 0.0, *width, *height),
            PaintOp::FillCircle { x, y, radius, color } => {
                ctx.begin_path();
                ctx.arc(*x, *y, *radius, 0.0, TAU).map_err(js_error)?;
                ctx.set_fill_style_str(color);
                ctx.fill();
            }
            PaintOp::StrokeRing { x, y, radius, width } => {
                ctx.begin_path();
                ctx.set_line_width(*width);
                ctx.arc(*x, *y, *radius, 0.0, TAU).map_err(js_error)?;
                ctx.stroke();
            }
        }
        Ok(())
    }
}

/// Text slots and press canvas of the hosting page.
pub struct DomSurface {
    document: Document,
    ids: ElementIds,
    style: PressStyle,
    /// Opened by `prepare`, or by the first `press` frame if the canvas was
    /// missing then.
    context: Option<CanvasRenderingContext2d>,
}

impl DomSurface {
    pub fn new(document: Document, config: &ViewConfig) -> Self {
        Self { document, ids: config.elements.clone(), style: config.press.clone(), context: None }
    }

    fn element_id(&self, slot: TextSlot) -> &str {
        match slot {
            TextSlot::ConsentId => &self.ids.consent_id,
            TextSlot::MaterialIndex => &self.ids.material_index,
            TextSlot::MaterialIndexPress => &self.ids.material_index_press,
            TextSlot::GestureType => &self.ids.gesture_type,
        }
    }

    fn context(&mut self) -> Result<CanvasRenderingContext2d, ViewError> {
        if let Some(ctx) = &self.context {
            return Ok(ctx.clone());
        }
        let ctx = open_canvas(&self.document, &self.ids.press_canvas, self.style.size)?;
        self.context = Some(ctx.clone());
        Ok(ctx)
    }
}

impl ViewSurface for DomSurface {
    fn prepare(&mut self) -> Result<(), ViewError> {
        self.context().map(drop)
    }

    fn set_text(&mut self, slot: TextSlot, text: &str) -> Result<(), ViewError> {
        let id = self.element_id(slot);
        let element = self
            .document
            .get_element_by_id(id)
            .ok_or_else(|| ViewError::MissingElement(id.to_owned()))?;
        element.set_text_content(Some(text));
        Ok(())
    }

    fn draw_press(&mut self, circle: f64, ring: f64) -> Result<(), ViewError> {
        let ctx = self.context()?;
        paint_press(&mut CanvasPainter(&ctx), &self.style, circle, ring)
    }
}

/// Radio inputs looked up by their `name` attribute.
pub struct DomRadios {
    document: Document,
}

impl DomRadios {
    pub fn new(document: Document) -> Self {
        Self { document }
    }
}

impl RadioGroups for DomRadios {
    fn checked_values(&self, group: &str) -> Vec<String> {
        let nodes = self.document.get_elements_by_name(group);
        (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|node| {
                node.dyn_ref::<HtmlInputElement>()
                    .filter(|input| input.checked())
                    .map(HtmlInputElement::value)
            })
            .collect()
    }
}
