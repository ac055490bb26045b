//! Object paths and attribute names of the wind-tunnel stage.

// -- Streamlines --

/// Parent of every streamline object.
pub const STREAMLINES_ROOT: &str = "/World/Streamlines";
/// Seed sphere the streamlines originate from.
pub const STREAMLINES_SEED_SPHERE: &str = "/World/Streamlines/StreamStart_sphere";
/// Generated curves.
pub const STREAMLINES_CURVES: &str = "/World/Streamlines/StreamLines";
/// Debug point cloud, never shown.
pub const STREAMLINES_POINT_CLOUD: &str = "/World/Streamlines/pointcloud";
/// Bounds the seed sphere may move within.
pub const STREAMLINES_BOUNDS: &str = "/World/Streamlines/SliderBounds";

// -- Smoke probes --

/// Root of the flow smoke probe setup.
pub const SMOKE_ROOT: &str = "/World/Flow_CFD";
/// Flow simulation driving the probes.
pub const SMOKE_SIMULATION: &str = "/World/Flow_CFD/CFDResults/flowSimulate";
/// Parent of the line probe emitters.
pub const SMOKE_PROBES: &str = "/World/Flow_CFD/CFDResults/FlowLineProbes";
/// Bounds the probe emitters may move within.
pub const SMOKE_BOUNDS: &str = "/World/Flow_CFD/CFDResults/SliderBounds";

// -- Flow rendering (color attribute) --

/// Offscreen velocity pass.
pub const FLOW_OFFSCREEN_VELOCITY: &str = "/World/Flow_CFD/CFDResults/flowOffscreen";
/// Onscreen velocity pass.
pub const FLOW_RENDER_VELOCITY: &str = "/World/Flow_CFD/CFDResults/flowRender";
/// Velocity volume emitter.
pub const FLOW_EMITTER_VELOCITY: &str =
    "/World/Flow_CFD/CFDResults/VDB/flowEmitterNanoVdb_velocity";
/// Offscreen pressure pass.
pub const FLOW_OFFSCREEN_PRESSURE: &str =
    "/World/Flow_CFD/CFDResults/flowOffscreen_pressure";
/// Onscreen pressure pass.
pub const FLOW_RENDER_PRESSURE: &str = "/World/Flow_CFD/CFDResults/flowRender_pressure";
/// Pressure volume emitter.
pub const FLOW_EMITTER_PRESSURE: &str =
    "/World/Flow_CFD/CFDResults/VDB/flowEmitterNanoVdb_pressure";
/// Ray-march colormap of the onscreen flow pass.
pub const FLOW_RAY_MARCH: &str = "/World/Flow_CFD/CFDResults/flowRender/rayMarch";
/// Shadow colormap of the offscreen flow pass.
pub const FLOW_SHADOW: &str = "/World/Flow_CFD/CFDResults/flowOffscreen/shadow";
/// Render layer of a visible flow pass.
pub const FLOW_LAYER_SHOWN: i64 = 2;
/// Render layer of a hidden flow pass.
pub const FLOW_LAYER_HIDDEN: i64 = 0;

// -- IndeX --

/// Root of the IndeX volume and slices.
pub const INDEX_ROOT: &str = "/World/IndeX";
/// Volume rendering object.
pub const INDEX_VOLUME: &str = "/World/IndeX/Volume";
/// Slice normal to X.
pub const INDEX_SLICE_X: &str = "/World/IndeX/Volume_SliceX";
/// Slice normal to Y.
pub const INDEX_SLICE_Y: &str = "/World/IndeX/Volume_SliceY";
/// Slice normal to Z.
pub const INDEX_SLICE_Z: &str = "/World/IndeX/Volume_SliceZ";
/// Bounds the slices move within.
pub const INDEX_BOUNDS: &str = "/World/IndeX/SliderBounds";
/// Velocity material of the volume.
pub const INDEX_VOLUME_VELOCITY_MATERIAL: &str =
    "/World/IndeX/Volume/MaterialVelocity_Preset01";
/// Pressure material of the volume.
pub const INDEX_VOLUME_PRESSURE_MATERIAL: &str =
    "/World/IndeX/Volume/MaterialPressure_Preset01";
/// Velocity material of the slices.
pub const INDEX_SLICE_VELOCITY_MATERIAL: &str = "/World/IndeX/SliceMaterial_Velocity";
/// Pressure material of the slices.
pub const INDEX_SLICE_PRESSURE_MATERIAL: &str = "/World/IndeX/SliceMaterial_Pressure";
/// Velocity colormap of the volume.
pub const INDEX_VELOCITY_COLORMAP: &str =
    "/World/IndeX/Volume/MaterialVelocity_Preset01/Colormap";
/// Pressure colormap of the volume.
pub const INDEX_PRESSURE_COLORMAP: &str =
    "/World/IndeX/Volume/MaterialPressure_Preset01/Colormap";

// -- Attribute / relationship names --

/// Object translation.
pub const ATTR_TRANSLATE: &str = "xformOp:translate";
/// Sphere radius.
pub const ATTR_RADIUS: &str = "radius";
/// Flow simulation clear flag.
pub const ATTR_FORCE_CLEAR: &str = "forceClear";
/// Flow simulation run flag.
pub const ATTR_FORCE_SIMULATE: &str = "forceSimulate";
/// Flow render layer.
pub const ATTR_LAYER: &str = "layer";
/// Flow emitter enable flag.
pub const ATTR_ENABLED: &str = "enabled";
/// Flow colormap lower bound.
pub const ATTR_COLORMAP_MIN: &str = "colormapXMin";
/// Flow colormap upper bound.
pub const ATTR_COLORMAP_MAX: &str = "colormapXMax";
/// IndeX colormap domain.
pub const ATTR_DOMAIN: &str = "domain";
/// Material binding relationship.
pub const REL_MATERIAL_BINDING: &str = "material:binding";

// -- Triggers --

/// Raises or lowers the vehicle platform, alternating on each fire.
pub const TRIGGER_CAR_SWAP: &str = "carSwap";
/// Switches the interactive camera.
pub const TRIGGER_SWITCH_CAMERA: &str = "switchCamera";
/// Starts the interactive camera system.
pub const TRIGGER_START_CONFIG: &str = "startConfig";
