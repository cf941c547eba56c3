use ohmlab_core::{CapabilityProbe, DeviceCapabilities};
use wasm_bindgen::JsValue;
use web_sys as web;

/// Reads what the browser exposes about the device.
pub struct NavigatorProbe {
    navigator: web::Navigator,
}

impl NavigatorProbe {
    pub fn new(window: &web::Window) -> Self {
        Self {
            navigator: window.navigator(),
        }
    }

    /// `navigator.gpu` is present only where WebGPU is exposed.
    pub fn has_webgpu(&self) -> bool {
        js_sys::Reflect::get(&self.navigator, &JsValue::from_str("gpu"))
            .map(|v| !v.is_undefined() && !v.is_null())
            .unwrap_or(false)
    }
}

impl CapabilityProbe for NavigatorProbe {
    fn capabilities(&self) -> DeviceCapabilities {
        let cores = self.navigator.hardware_concurrency();
        // deviceMemory is non-standard and missing from web-sys
        let memory = js_sys::Reflect::get(&self.navigator, &JsValue::from_str("deviceMemory"))
            .ok()
            .and_then(|v| v.as_f64());
        DeviceCapabilities {
            hardware_concurrency: (cores.is_finite() && cores > 0.0).then_some(cores as u32),
            device_memory_gb: memory,
            user_agent: self.navigator.user_agent().unwrap_or_default(),
        }
    }
}
