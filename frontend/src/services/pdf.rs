//! html2canvas + jsPDF behind `DocumentRenderer`. Both are loaded from
//! script tags in `index.html`.

use async_trait::async_trait;
use gembank_core::documents::{DocumentRenderer, RenderRequest};
use gembank_core::RenderError;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Element, HtmlCanvasElement};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = html2canvas, catch)]
    fn html2canvas(element: &Element, options: &JsValue) -> Result<js_sys::Promise, JsValue>;

    #[wasm_bindgen(js_namespace = jspdf, js_name = jsPDF)]
    type JsPdf;

    #[wasm_bindgen(constructor, js_namespace = jspdf, js_class = "jsPDF", catch)]
    fn new(orientation: &str, unit: &str, format: &str) -> Result<JsPdf, JsValue>;

    #[wasm_bindgen(method, js_class = "jsPDF", js_name = addImage, catch)]
    fn add_image(
        this: &JsPdf,
        data_url: &str,
        format: &str,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Result<(), JsValue>;

    #[wasm_bindgen(method, js_class = "jsPDF", catch)]
    fn save(this: &JsPdf, file_name: &str) -> Result<(), JsValue>;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CanvasOptions {
    scale: f64,
    use_cors: bool,
}

fn describe(error: JsValue) -> String {
    error.as_string().unwrap_or_else(|| format!("{:?}", error))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CanvasPdfRenderer;

#[async_trait(?Send)]
impl DocumentRenderer for CanvasPdfRenderer {
    async fn render(&self, request: &RenderRequest) -> Result<(), RenderError> {
        let element = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.get_element_by_id(request.template_id))
            .ok_or_else(|| RenderError::MissingTemplate(request.template_id.to_string()))?;

        let options = serde_wasm_bindgen::to_value(&CanvasOptions {
            scale: request.scale,
            use_cors: true,
        })
        .map_err(|e| RenderError::Raster(e.to_string()))?;
        let promise = html2canvas(&element, &options).map_err(|e| RenderError::Raster(describe(e)))?;
        let canvas: HtmlCanvasElement = JsFuture::from(promise)
            .await
            .map_err(|e| RenderError::Raster(describe(e)))?
            .dyn_into()
            .map_err(|_| RenderError::Raster("html2canvas did not return a canvas".to_string()))?;
        let image = canvas
            .to_data_url_with_type("image/png")
            .map_err(|e| RenderError::Raster(describe(e)))?;

        let placement = request
            .fit
            .place(f64::from(canvas.width()), f64::from(canvas.height()));
        let pdf = JsPdf::new("p", "mm", "a4").map_err(|e| RenderError::Document(describe(e)))?;
        pdf.add_image(
            &image,
            "PNG",
            placement.x,
            placement.y,
            placement.width,
            placement.height,
        )
        .map_err(|e| RenderError::Document(describe(e)))?;
        pdf.save(&request.file_name)
            .map_err(|e| RenderError::Document(describe(e)))?;
        log::info!("saved {}", request.file_name);
        Ok(())
    }
}
