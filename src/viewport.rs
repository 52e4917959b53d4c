//! the viewport implements common canvas functions - e.g. panning, zooming
//! CanvasSpace <-> ViewportSpace <-> SchematicSpace
//! CanvasSpace is the UI canvas coordinate
//! ViewportSpace is the schematic coordinate in f32
//! SchematicSpace is the schematic coordinate in i32, snapped to the grid

use crate::config::EditorConfig;
use crate::transforms::{self, CSPoint, CVTransform, SSPoint, VCTransform, VSPoint};

#[derive(Debug, Clone)]
pub struct Viewport {
    /// viewport to canvas transform
    vct: VCTransform,
    /// the zoom scale, i.e. vct: VCTransform .determinant().abs().sqrt()
    zoom_scale: f32,

    /// the cursor positions in the different spaces
    curpos: (CSPoint, VSPoint, SSPoint),

    /// zoom in limit
    max_zoom: f32,
    /// zoom out limit
    min_zoom: f32,
    /// schematic space coordinates snap to multiples of this
    grid: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Viewport::from_config(&EditorConfig::default())
    }
}

impl Viewport {
    pub fn new(grid: u32, min_zoom: f32, max_zoom: f32, vct: VCTransform) -> Self {
        Viewport {
            vct,
            zoom_scale: vct.determinant().abs().sqrt(),
            curpos: Default::default(),
            max_zoom,
            min_zoom,
            grid,
        }
    }

    /// canvas and viewport space coincide until the user pans or zooms
    pub fn from_config(cfg: &EditorConfig) -> Self {
        Viewport::new(cfg.grid, cfg.min_zoom, cfg.max_zoom, VCTransform::identity())
    }

    /// return the canvas to viewport space transform
    pub fn cv_transform(&self) -> CVTransform {
        // zoom is clamped away from 0, the transform stays invertible
        self.vct.inverse().unwrap_or_else(CVTransform::identity)
    }

    /// returns the scale factor in the viewwport to canvas transform
    /// this value is stored to avoid calling sqrt() each time
    pub fn vc_scale(&self) -> f32 {
        self.zoom_scale
    }

    pub fn grid(&self) -> u32 {
        self.grid
    }

    /// returns the cursor position in canvas space
    pub fn curpos_csp(&self) -> CSPoint {
        self.curpos.0
    }

    /// returns the cursor position in viewport space
    pub fn curpos_vsp(&self) -> VSPoint {
        self.curpos.1
    }

    /// returns the snapped cursor position in schematic space
    pub fn curpos_ssp(&self) -> SSPoint {
        self.curpos.2
    }

    /// update the cursor position
    pub fn curpos_update(&mut self, csp: CSPoint) {
        let vsp = self.cv_transform().transform_point(csp);
        let ssp = self.snap(vsp);
        self.curpos = (csp, vsp, ssp);
    }

    /// canvas space to viewport space
    pub fn to_viewport(&self, csp: CSPoint) -> VSPoint {
        self.cv_transform().transform_point(csp)
    }

    /// viewport space to canvas space
    pub fn to_canvas(&self, vsp: VSPoint) -> CSPoint {
        self.vct.transform_point(vsp)
    }

    /// round a viewport space point to the nearest grid point
    pub fn snap(&self, vsp: VSPoint) -> SSPoint {
        transforms::snap(vsp, self.grid)
    }

    /// pan such that the content follows the cursor from csp_prev to csp_now
    pub fn pan(&mut self, csp_now: CSPoint, csp_prev: CSPoint) {
        let v = self.cv_transform().transform_vector(csp_now - csp_prev);
        self.vct = self.vct.pre_translate(v);
        self.curpos_update(csp_now);
    }

    /// wheel delta to zoom factor. positive deltas zoom in
    pub fn wheel_factor(delta: f32) -> f32 {
        1.0 + delta.clamp(-4.0, 4.0) / 5.
    }

    /// change the viewport zoom by zoom_factor, keeping the point under curpos_csp in place
    pub fn zoom(&mut self, zoom_factor: f32, curpos_csp: CSPoint) {
        let vsp = self.cv_transform().transform_point(curpos_csp);

        let target = (self.zoom_scale * zoom_factor).clamp(self.min_zoom, self.max_zoom);
        let clamped_factor = target / self.zoom_scale;
        let mut new_transform = self.vct.then_scale(clamped_factor, clamped_factor);

        // translate based on cursor location
        let csp1 = new_transform.transform_point(vsp);
        let translation = curpos_csp - csp1;
        new_transform = new_transform.then_translate(translation);

        self.vct = new_transform;
        self.zoom_scale = new_transform.determinant().abs().sqrt();
        self.curpos_update(curpos_csp);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: VSPoint, b: VSPoint) -> bool {
        (a - b).length() < 1e-3
    }

    #[test]
    fn zoom_keeps_point_under_cursor() {
        let mut vp = Viewport::default();
        vp.pan(CSPoint::new(40.0, 25.0), CSPoint::new(0.0, 0.0));
        let csp = CSPoint::new(130.0, 70.0);
        let before = vp.to_viewport(csp);
        vp.zoom(Viewport::wheel_factor(2.0), csp);
        assert!((vp.vc_scale() - 1.4).abs() < 1e-4);
        assert!(close(vp.to_viewport(csp), before));
        vp.zoom(Viewport::wheel_factor(-3.0), csp);
        assert!(close(vp.to_viewport(csp), before));
        assert!((vp.to_canvas(before) - csp).length() < 1e-3);
    }

    #[test]
    fn zoom_is_clamped() {
        let mut vp = Viewport::new(10, 0.5, 2.0, VCTransform::identity());
        for _ in 0..10 {
            vp.zoom(1.8, CSPoint::new(3.0, 4.0));
        }
        assert!((vp.vc_scale() - 2.0).abs() < 1e-4);
        for _ in 0..10 {
            vp.zoom(0.2, CSPoint::new(3.0, 4.0));
        }
        assert!((vp.vc_scale() - 0.5).abs() < 1e-4);
    }

    #[test]
    fn pan_moves_content_with_cursor() {
        let mut vp = Viewport::default();
        let world = vp.to_viewport(CSPoint::new(10.0, 10.0));
        vp.pan(CSPoint::new(35.0, 5.0), CSPoint::new(10.0, 10.0));
        assert!(close(vp.to_viewport(CSPoint::new(35.0, 5.0)), world));
        assert_eq!(vp.curpos_csp(), CSPoint::new(35.0, 5.0));
    }

    #[test]
    fn cursor_snaps_to_grid() {
        let mut vp = Viewport::default();
        vp.curpos_update(CSPoint::new(26.0, -4.0));
        assert_eq!(vp.curpos_ssp(), SSPoint::new(30, 0));
        assert_eq!(vp.curpos_vsp(), VSPoint::new(26.0, -4.0));
    }
}
