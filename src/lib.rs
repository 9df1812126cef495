#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs, unreachable_pub)]
/*!

`gate-schematic`

Lays out a flat, ordered gate-level netlist as a rail-and-tap schematic.

Every wire gets a horizontal rail at its own lane. Gates sit in the column
of their logic depth, and each gate input drops from the producer's rail at
a tap point that is staggered per depth so that no two drop lines at the
same depth share an x position. The result is a [scene::Scene] of plain
drawing primitives that any [scene::Surface] can paint.

The pipeline is:

1. [graph] — producer lookup, wire classification and logic depth.
2. [geometry] — canvas extents, one column per depth, one lane per wire.
3. [routing] — tap points and rail extents.
4. [render] — the scene itself, using the [symbol] silhouettes.

*/
#![doc = "## Simple Example\n```"]
#![doc = include_str!("../demos/half_adder.rs")]
#![doc = "\n```"]

pub mod circuit;
pub mod config;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod netlist;
pub mod render;
pub mod routing;
pub mod scene;
pub mod svg;
pub mod symbol;
pub mod util;

use config::RenderConfig;
use error::LayoutError;
use graph::{Analysis, Analyzed};
use netlist::Netlist;
use scene::Scene;

/// Runs the whole layout pipeline on `netlist` and returns the finished scene.
///
/// An empty netlist yields [Scene::empty]. A netlist whose wires depend on
/// themselves fails with [LayoutError::CyclicDependency].
pub fn layout(netlist: &Netlist, config: &RenderConfig) -> Result<Scene, LayoutError> {
    if netlist.is_empty() {
        clilog::debug!("empty netlist, nothing to lay out");
        return Ok(Scene::empty());
    }

    let analyzed = Analyzed::build(netlist)?;
    let geometry = geometry::plan(&analyzed);
    let mut routing = routing::route(&analyzed, &geometry);
    render::render(&analyzed, &geometry, &mut routing, config)
}

/// Lays out `netlist` and paints it as a standalone SVG document.
pub fn render_svg(netlist: &Netlist, config: &RenderConfig) -> Result<String, LayoutError> {
    let scene = layout(netlist, config)?;
    let mut surface = svg::SvgSurface::new(&config.background);
    scene.paint(&mut surface);
    Ok(surface.finish())
}
