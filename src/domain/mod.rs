// Domain layer: data model and ports (interfaces). Nothing here touches the
// network; the transport seam is a trait implemented under adapters/.

pub mod model;
pub mod ports;
