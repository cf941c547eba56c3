//! SVG rendition of the circuit: battery on the left, resistor on the right,
//! joined by wires whose color and glow follow the snapshot.
//!
//! Particle and heat-wave motion uses SVG `<animate>` so the markup is
//! self-contained and needs no per-frame updates.

use crate::readout::{trim_number, Readouts};
use crate::simulator::Snapshot;
use std::fmt::Write;

pub const VIEWBOX_WIDTH: u32 = 450;
pub const VIEWBOX_HEIGHT: u32 = 320;

const TOP_WIRE_Y: f64 = 105.0;
const BOTTOM_WIRE_Y: f64 = 215.0;
const LEFT_X: f64 = 85.0;
const RIGHT_X: f64 = 348.0;
const PARTICLES_PER_WIRE: usize = 5;
const PARTICLE_STAGGER_SEC: f64 = 0.4;
const HEAT_WAVES: usize = 3;
const HEAT_WAVE_PERIOD_SEC: f64 = 1.5;
const HEAT_WAVE_STAGGER_SEC: f64 = 0.5;

/// Complete `<svg>` document for `snap`.
pub fn render_svg(snap: &Snapshot) -> String {
    let mut out = String::with_capacity(8 * 1024);
    // Writing into a String cannot fail.
    let _ = write_svg(&mut out, snap);
    out
}

fn write_svg(out: &mut String, snap: &Snapshot) -> std::fmt::Result {
    let wire = snap.visuals.wire_color.to_string();
    writeln!(
        out,
        r#"<svg viewBox="0 0 {VIEWBOX_WIDTH} {VIEWBOX_HEIGHT}" xmlns="http://www.w3.org/2000/svg" role="img" aria-label="Battery and resistor circuit">"#
    )?;
    write_defs(out, snap.visuals.glow_radius)?;
    write_battery(out, snap)?;

    // top wire with its shadow
    write_wire(out, LEFT_X, TOP_WIRE_Y, RIGHT_X, TOP_WIRE_Y, &wire, true)?;
    write_particles(out, snap, LEFT_X, RIGHT_X, TOP_WIRE_Y, "top")?;

    write_resistor(out, snap)?;

    write_wire(out, RIGHT_X, BOTTOM_WIRE_Y, LEFT_X, BOTTOM_WIRE_Y, &wire, true)?;
    write_particles(out, snap, RIGHT_X, LEFT_X, BOTTOM_WIRE_Y, "bottom")?;

    // vertical leads into the resistor caps and the battery terminals
    write_wire(out, RIGHT_X, TOP_WIRE_Y, RIGHT_X, 160.0, &wire, false)?;
    write_wire(out, RIGHT_X, 160.0, RIGHT_X, BOTTOM_WIRE_Y, &wire, false)?;
    write_wire(out, 60.0, TOP_WIRE_Y, 60.0, 110.0, &wire, false)?;
    write_wire(out, 60.0, 210.0, 60.0, BOTTOM_WIRE_Y, &wire, false)?;

    out.push_str("</svg>\n");
    Ok(())
}

fn write_defs(out: &mut String, glow_radius: f64) -> std::fmt::Result {
    writeln!(out, "<defs>")?;
    writeln!(
        out,
        r#"<filter id="wireGlow"><feGaussianBlur stdDeviation="{glow_radius:.2}" result="coloredBlur"/><feMerge><feMergeNode in="coloredBlur"/><feMergeNode in="SourceGraphic"/></feMerge></filter>"#
    )?;
    let gradients: [(&str, bool, &[(u32, &str)]); 5] = [
        ("batteryBodyGradient", true, &[(0, "#2C3E50"), (50, "#34495E"), (100, "#2C3E50")]),
        ("batteryTopGradient", false, &[(0, "#E74C3C"), (100, "#C0392B")]),
        ("batteryBottomGradient", false, &[(0, "#3498DB"), (100, "#2980B9")]),
        (
            "resistorGradient",
            true,
            &[
                (0, "#8B7355"),
                (20, "#D2B48C"),
                (50, "#DEB887"),
                (80, "#D2B48C"),
                (100, "#8B7355"),
            ],
        ),
        ("metalCapGradient", true, &[(0, "#A8A8A8"), (50, "#E8E8E8"), (100, "#A8A8A8")]),
    ];
    for (id, horizontal, stops) in gradients {
        let (x2, y2) = if horizontal { ("100%", "0%") } else { ("0%", "100%") };
        write!(
            out,
            r#"<linearGradient id="{id}" x1="0%" y1="0%" x2="{x2}" y2="{y2}">"#
        )?;
        for (offset, color) in stops {
            write!(out, r#"<stop offset="{offset}%" stop-color="{color}"/>"#)?;
        }
        writeln!(out, "</linearGradient>")?;
    }
    writeln!(out, "</defs>")
}

fn write_battery(out: &mut String, snap: &Snapshot) -> std::fmt::Result {
    writeln!(out, r#"<g id="battery" transform="translate(60, 160)">"#)?;
    writeln!(
        out,
        r##"<rect x="-25" y="-50" width="50" height="100" rx="4" fill="url(#batteryBodyGradient)" stroke="#1A252F" stroke-width="2"/>"##
    )?;
    writeln!(
        out,
        r##"<rect x="-12" y="-55" width="24" height="8" rx="2" fill="url(#batteryTopGradient)" stroke="#A93226" stroke-width="1"/>"##
    )?;
    writeln!(
        out,
        r##"<rect x="-3" y="-60" width="6" height="8" rx="1" fill="#E74C3C" stroke="#A93226" stroke-width="1"/>"##
    )?;
    writeln!(
        out,
        r##"<rect x="-15" y="50" width="30" height="6" rx="2" fill="url(#batteryBottomGradient)" stroke="#1F618D" stroke-width="1"/>"##
    )?;
    writeln!(
        out,
        r##"<text x="0" y="-40" text-anchor="middle" fill="#E74C3C" font-size="20" font-weight="bold">+</text>"##
    )?;
    writeln!(
        out,
        r##"<text x="0" y="45" text-anchor="middle" fill="#3498DB" font-size="20" font-weight="bold">−</text>"##
    )?;
    writeln!(
        out,
        r#"<text x="0" y="-68" text-anchor="middle" fill="white" font-size="13" font-weight="bold">Battery</text>"#
    )?;
    writeln!(
        out,
        r#"<rect x="-20" y="-15" width="40" height="30" rx="4" fill="rgba(0,0,0,0.6)"/>"#
    )?;
    writeln!(
        out,
        r##"<text id="battery-voltage" x="0" y="5" text-anchor="middle" fill="#FFD700" font-size="18" font-weight="bold">{}V</text>"##,
        trim_number(snap.inputs.voltage)
    )?;
    writeln!(out, "</g>")
}

fn write_wire(
    out: &mut String,
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    color: &str,
    glow: bool,
) -> std::fmt::Result {
    let filter = if glow { r#" filter="url(#wireGlow)""# } else { "" };
    writeln!(
        out,
        r#"<line class="wire" x1="{x1}" y1="{y1}" x2="{x2}" y2="{y2}" stroke="{color}" stroke-width="5" stroke-linecap="round"{filter}/>"#
    )?;
    // Offset shadow gives the wire some depth; vertical leads shift right, horizontal ones down.
    let (dx, dy) = if x1 == x2 { (2.0, 0.0) } else { (0.0, 2.0) };
    writeln!(
        out,
        r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="rgba(0,0,0,0.2)" stroke-width="5" stroke-linecap="round"/>"#,
        x1 + dx,
        y1 + dy,
        x2 + dx,
        y2 + dy
    )
}

fn write_particles(
    out: &mut String,
    snap: &Snapshot,
    from_x: f64,
    to_x: f64,
    y: f64,
    tag: &str,
) -> std::fmt::Result {
    let Some(fill) = snap.visuals.svg_particle_fill else {
        return Ok(());
    };
    let period = snap.visuals.svg_particle_period;
    for i in 0..PARTICLES_PER_WIRE {
        let delay = i as f64 * PARTICLE_STAGGER_SEC;
        writeln!(
            out,
            r#"<circle class="particle" id="particle-{tag}-{i}" cx="{from_x}" cy="{y}" r="4" fill="{fill}" opacity="0"><animate attributeName="cx" values="{from_x};{to_x}" dur="{period:.3}s" begin="{delay:.1}s" repeatCount="indefinite"/><animate attributeName="opacity" values="0;1;1;0" dur="{period:.3}s" begin="{delay:.1}s" repeatCount="indefinite"/></circle>"#
        )?;
    }
    Ok(())
}

fn write_resistor(out: &mut String, snap: &Snapshot) -> std::fmt::Result {
    writeln!(out, r#"<g id="resistor" transform="translate(380, 160)">"#)?;
    writeln!(
        out,
        r##"<ellipse cx="-32" cy="0" rx="4" ry="12" fill="url(#metalCapGradient)" stroke="#888" stroke-width="1"/>"##
    )?;
    writeln!(
        out,
        r##"<rect x="-32" y="-12" width="64" height="24" fill="url(#resistorGradient)" stroke="#6B5A3D" stroke-width="1.5"/>"##
    )?;
    writeln!(
        out,
        r#"<ellipse cx="0" cy="-12" rx="32" ry="3" fill="rgba(255,255,255,0.3)"/>"#
    )?;
    writeln!(
        out,
        r#"<rect id="resistor-heat" x="-32" y="-12" width="64" height="24" fill="{}"/>"#,
        snap.visuals.heat_overlay
    )?;
    // color bands
    for (x, w, color, opacity) in [
        (-22, 5, "#FFD700", 1.0),
        (-10, 5, "#000000", 1.0),
        (2, 5, "#8B4513", 1.0),
        (18, 4, "#FFD700", 0.8),
    ] {
        writeln!(
            out,
            r#"<rect x="{x}" y="-12" width="{w}" height="24" fill="{color}" opacity="{opacity}"/>"#
        )?;
    }
    writeln!(
        out,
        r##"<ellipse cx="32" cy="0" rx="4" ry="12" fill="url(#metalCapGradient)" stroke="#888" stroke-width="1"/>"##
    )?;
    writeln!(
        out,
        r#"<text x="0" y="-26" text-anchor="middle" fill="white" font-size="13" font-weight="bold">Resistor</text>"#
    )?;
    writeln!(
        out,
        r#"<rect x="-28" y="18" width="56" height="22" rx="4" fill="rgba(0,0,0,0.6)"/>"#
    )?;
    let readouts = Readouts::new(&snap.inputs, &snap.outputs);
    writeln!(
        out,
        r##"<text id="resistor-ohms" x="0" y="33" text-anchor="middle" fill="#FFD700" font-size="14" font-weight="bold">{}</text>"##,
        readouts.resistor_label.replace(' ', "")
    )?;
    if snap.visuals.heat_waves {
        for i in 0..HEAT_WAVES {
            let delay = i as f64 * HEAT_WAVE_STAGGER_SEC;
            writeln!(
                out,
                r##"<path class="heat-wave" d="M -10,-35 Q -5,-40 0,-35 Q 5,-30 10,-35" stroke="#FF6B6B" stroke-width="2" fill="none" opacity="0.8"><animateTransform attributeName="transform" type="translate" values="0 0;0 -20" dur="{HEAT_WAVE_PERIOD_SEC}s" begin="{delay:.1}s" repeatCount="indefinite"/><animate attributeName="opacity" values="0.8;0" dur="{HEAT_WAVE_PERIOD_SEC}s" begin="{delay:.1}s" repeatCount="indefinite"/></path>"##
            )?;
        }
    }
    writeln!(out, "</g>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulator::Simulator;

    #[test]
    fn default_diagram_shows_inputs_and_particles() {
        let snap = Simulator::default().snapshot();
        let svg = render_svg(&snap);
        assert!(svg.starts_with("<svg viewBox=\"0 0 450 320\""));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains(">12V</text>"));
        assert!(svg.contains(">10Ω</text>"));
        assert!(svg.contains("stroke=\"rgb(152, 152, 25)\""));
        assert!(svg.contains("stdDeviation=\"2.40\""));
        assert_eq!(svg.matches("class=\"particle\"").count(), 10);
        // 14.4 W is above the heat-wave threshold
        assert_eq!(svg.matches("class=\"heat-wave\"").count(), 3);
        let heat = snap.visuals.heat_overlay.to_string();
        assert!(heat.starts_with("rgba(73.4"));
        let overlay = format!(
            r#"<rect id="resistor-heat" x="-32" y="-12" width="64" height="24" fill="{heat}"/>"#
        );
        assert!(svg.contains(&overlay));
    }

    #[test]
    fn no_particles_or_waves_without_voltage() {
        let mut sim = Simulator::default();
        sim.set_voltage(0.0);
        let svg = render_svg(&sim.snapshot());
        assert!(!svg.contains("class=\"particle\""));
        assert!(!svg.contains("class=\"heat-wave\""));
        assert!(svg.contains("stroke=\"rgb(50, 50, 50)\""));
    }

    #[test]
    fn output_is_deterministic() {
        let snap = Simulator::default().snapshot();
        assert_eq!(render_svg(&snap), render_svg(&snap));
    }
}
