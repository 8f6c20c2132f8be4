//! # Bound Document Codec
//!
//! Converts the bound tree to and from resource document nodes. Tag and
//! attribute names follow the external toolchain's bound schema; the codec
//! here owns the mapping, the data model stays format-agnostic.

use crate::bound::{Bound, BoundComposite, BoundGeometry, BoundShared, Polygon};
use crate::error::BoundError;
use crate::material::{MaterialItem, MaterialTable};
use crate::vertices::VertexPool;
use rage_doc::{DocNode, ITEM};

// =============================================================================
// ENCODING
// =============================================================================

/// Encodes a composite as a complete `BoundsFile` document.
pub fn composite_to_doc(composite: &BoundComposite) -> DocNode {
    let mut bounds = DocNode::new("Bounds").with_attr("type", "Composite");
    write_shared(&mut bounds, &composite.shared);

    let mut children = DocNode::new("Children");
    for child in &composite.children {
        children.push(bound_to_item(child));
    }
    bounds.push(children);

    DocNode::new("BoundsFile").with_child(bounds)
}

fn bound_to_item(bound: &Bound) -> DocNode {
    let mut item = DocNode::new(ITEM).with_attr("type", bound.tag());
    write_shared(&mut item, bound.shared());
    if let Some(geometry) = bound.geometry() {
        write_geometry(&mut item, geometry);
    }
    item
}

fn write_shared(node: &mut DocNode, shared: &BoundShared) {
    node.push(DocNode::vec3("BoxMin", shared.box_min));
    node.push(DocNode::vec3("BoxMax", shared.box_max));
    node.push(DocNode::vec3("BoxCenter", shared.box_center));
    node.push(DocNode::vec3("SphereCenter", shared.sphere_center));
    node.push(DocNode::scalar("SphereRadius", shared.sphere_radius));
    node.push(DocNode::scalar("ProceduralId", shared.procedural_id));
    node.push(DocNode::scalar("RoomId", shared.room_id));
    node.push(DocNode::scalar("PedDensity", shared.ped_density));
    node.push(DocNode::scalar("PolyFlags", shared.poly_flags));
    node.push(DocNode::string_list(
        "CompositeFlags1",
        &shared.composite_flags1,
    ));
    node.push(DocNode::string_list(
        "CompositeFlags2",
        &shared.composite_flags2,
    ));
}

fn write_geometry(node: &mut DocNode, geometry: &BoundGeometry) {
    node.push(DocNode::vec3("GeometryCenter", geometry.geometry_center));

    let mut materials = DocNode::new("Materials");
    for item in geometry.materials.items() {
        materials.push(material_to_item(item));
    }
    node.push(materials);

    let mut vertices = DocNode::new("Vertices");
    for point in geometry.vertices.points() {
        vertices.push(DocNode::vec3(ITEM, *point));
    }
    node.push(vertices);

    let mut polygons = DocNode::new("Polygons");
    for polygon in &geometry.polygons {
        polygons.push(polygon_to_node(polygon));
    }
    node.push(polygons);
}

fn material_to_item(item: &MaterialItem) -> DocNode {
    DocNode::new(ITEM)
        .with_child(DocNode::scalar("Type", item.type_index))
        .with_child(DocNode::scalar("ProceduralId", item.procedural_id))
        .with_child(DocNode::scalar("RoomId", item.room_id))
        .with_child(DocNode::scalar("PedDensity", item.ped_density))
        .with_child(DocNode::scalar(
            "MaterialColourIndex",
            item.material_color_index,
        ))
        .with_child(DocNode::string_list("Flags", &item.flags))
}

/// Polygons are attribute-only records: `m` for the material slot, `v1..`
/// for vertex indices, `radius` where the primitive has one.
fn polygon_to_node(polygon: &Polygon) -> DocNode {
    let node = DocNode::new(polygon.tag()).with_attr("m", polygon.material_index());
    match *polygon {
        Polygon::Triangle { v1, v2, v3, .. } => node
            .with_attr("v1", v1)
            .with_attr("v2", v2)
            .with_attr("v3", v3),
        Polygon::Box { v1, v2, v3, v4, .. } => node
            .with_attr("v1", v1)
            .with_attr("v2", v2)
            .with_attr("v3", v3)
            .with_attr("v4", v4),
        Polygon::Sphere { v, radius, .. } => {
            node.with_attr("v", v).with_attr("radius", radius)
        }
        Polygon::Capsule { v1, v2, radius, .. } | Polygon::Cylinder { v1, v2, radius, .. } => node
            .with_attr("v1", v1)
            .with_attr("v2", v2)
            .with_attr("radius", radius),
    }
}

// =============================================================================
// DECODING
// =============================================================================

/// Decodes a composite from a `BoundsFile` document.
pub fn composite_from_doc(doc: &DocNode) -> Result<BoundComposite, BoundError> {
    let bounds = doc.expect_child("Bounds")?;
    let shared = read_shared(bounds)?;

    let mut children = Vec::new();
    if let Some(list) = bounds.child("Children") {
        for item in list.items() {
            children.push(bound_from_item(item)?);
        }
    }
    Ok(BoundComposite { shared, children })
}

fn bound_from_item(item: &DocNode) -> Result<Bound, BoundError> {
    let tag = item.attr("type").unwrap_or_default().to_string();
    let shared = read_shared(item)?;
    let bound = match tag.as_str() {
        "Box" => Bound::Box(shared),
        "Sphere" => Bound::Sphere(shared),
        "Capsule" => Bound::Capsule(shared),
        "Cylinder" => Bound::Cylinder(shared),
        "Disc" => Bound::Disc(shared),
        "Cloth" => Bound::Cloth(shared),
        "Geometry" => Bound::Geometry(read_geometry(item, shared)?),
        "GeometryBVH" => Bound::GeometryBvh(read_geometry(item, shared)?),
        other => {
            return Err(BoundError::UnsupportedBoundKind {
                kind: other.to_string(),
                object: "Bounds child".to_string(),
            })
        }
    };
    Ok(bound)
}

fn read_shared(node: &DocNode) -> Result<BoundShared, BoundError> {
    Ok(BoundShared {
        box_min: node.child_vec3("BoxMin")?,
        box_max: node.child_vec3("BoxMax")?,
        box_center: node.child_vec3("BoxCenter")?,
        sphere_center: node.child_vec3("SphereCenter")?,
        sphere_radius: node.child_f64("SphereRadius")?,
        procedural_id: node.child_u32("ProceduralId")?,
        room_id: node.child_u32("RoomId")?,
        ped_density: node.child_u32("PedDensity")?,
        poly_flags: node.child_u32("PolyFlags")?,
        composite_flags1: node.child_string_list("CompositeFlags1"),
        composite_flags2: node.child_string_list("CompositeFlags2"),
    })
}

fn read_geometry(node: &DocNode, shared: BoundShared) -> Result<BoundGeometry, BoundError> {
    let geometry_center = node.child_vec3("GeometryCenter")?;

    let mut items = Vec::new();
    if let Some(list) = node.child("Materials") {
        for item in list.items() {
            items.push(material_from_item(item)?);
        }
    }
    let materials = MaterialTable::from_items(items);

    let mut points = Vec::new();
    if let Some(list) = node.child("Vertices") {
        for item in list.items() {
            points.push(item.as_vec3()?);
        }
    }
    let vertices = VertexPool::from_points(points);

    let mut polygons = Vec::new();
    if let Some(list) = node.child("Polygons") {
        for child in &list.children {
            polygons.push(polygon_from_node(child)?);
        }
    }

    Ok(BoundGeometry {
        shared,
        geometry_center,
        materials,
        vertices,
        polygons,
    })
}

fn material_from_item(item: &DocNode) -> Result<MaterialItem, BoundError> {
    Ok(MaterialItem {
        type_index: item.child_u32("Type")?,
        procedural_id: item.child_u32("ProceduralId")?,
        room_id: item.child_u32("RoomId")?,
        ped_density: item.child_u32("PedDensity")?,
        material_color_index: item.child_u32("MaterialColourIndex")?,
        flags: item.child_string_list("Flags"),
    })
}

fn polygon_from_node(node: &DocNode) -> Result<Polygon, BoundError> {
    let m = parse_u32(node, "m")?;
    let polygon = match node.name.as_str() {
        "Triangle" => Polygon::Triangle {
            v1: parse_u32(node, "v1")?,
            v2: parse_u32(node, "v2")?,
            v3: parse_u32(node, "v3")?,
            material_index: m,
        },
        "Box" => Polygon::Box {
            v1: parse_u32(node, "v1")?,
            v2: parse_u32(node, "v2")?,
            v3: parse_u32(node, "v3")?,
            v4: parse_u32(node, "v4")?,
            material_index: m,
        },
        "Sphere" => Polygon::Sphere {
            v: parse_u32(node, "v")?,
            radius: parse_f64(node, "radius")?,
            material_index: m,
        },
        "Capsule" => Polygon::Capsule {
            v1: parse_u32(node, "v1")?,
            v2: parse_u32(node, "v2")?,
            radius: parse_f64(node, "radius")?,
            material_index: m,
        },
        "Cylinder" => Polygon::Cylinder {
            v1: parse_u32(node, "v1")?,
            v2: parse_u32(node, "v2")?,
            radius: parse_f64(node, "radius")?,
            material_index: m,
        },
        other => return Err(BoundError::UnknownPolygonTag(other.to_string())),
    };
    Ok(polygon)
}

fn parse_u32(node: &DocNode, name: &str) -> Result<u32, BoundError> {
    let raw = require_attr(node, name)?;
    raw.trim()
        .parse()
        .map_err(|_| invalid(node, raw, "u32"))
}

fn parse_f64(node: &DocNode, name: &str) -> Result<f64, BoundError> {
    let raw = require_attr(node, name)?;
    raw.trim()
        .parse()
        .map_err(|_| invalid(node, raw, "f64"))
}

fn require_attr<'a>(node: &'a DocNode, name: &str) -> Result<&'a str, BoundError> {
    node.attr(name)
        .ok_or_else(|| {
            BoundError::Doc(rage_doc::DocError::MissingAttribute {
                node: node.name.clone(),
                attribute: name.to_string(),
            })
        })
}

fn invalid(node: &DocNode, raw: &str, expected: &'static str) -> BoundError {
    BoundError::Doc(rage_doc::DocError::InvalidValue {
        node: node.name.clone(),
        value: raw.to_string(),
        expected,
    })
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;

    fn sample_composite() -> BoundComposite {
        let shared = BoundShared {
            box_min: DVec3::splat(-1.0),
            box_max: DVec3::splat(1.0),
            sphere_radius: 1.5,
            ..BoundShared::default()
        };
        let mut child_shared = shared.clone();
        child_shared.composite_flags1 = vec!["MAP_WEAPON".to_string()];

        let mut materials = MaterialTable::new();
        materials.ensure_default();
        let mut vertices = VertexPool::new();
        let v0 = vertices.append(DVec3::ZERO);
        let v1 = vertices.append(DVec3::X);
        let v2 = vertices.append(DVec3::Y);

        let geometry = BoundGeometry {
            shared: child_shared.clone(),
            geometry_center: DVec3::ZERO,
            materials,
            vertices,
            polygons: vec![Polygon::Triangle {
                v1: v0,
                v2: v1,
                v3: v2,
                material_index: 0,
            }],
        };

        BoundComposite {
            shared,
            children: vec![Bound::Box(child_shared), Bound::GeometryBvh(geometry)],
        }
    }

    #[test]
    fn test_composite_doc_round_trip() {
        let composite = sample_composite();
        let doc = composite_to_doc(&composite);
        let back = composite_from_doc(&doc).unwrap();
        assert_eq!(back.children.len(), 2);
        assert_eq!(back.children[0].tag(), "Box");
        assert_eq!(back.children[1].tag(), "GeometryBVH");
        assert_eq!(back.shared.sphere_radius, composite.shared.sphere_radius);
        let geometry = back.children[1].geometry().unwrap();
        assert_eq!(geometry.vertices.len(), 3);
        assert_eq!(geometry.polygons.len(), 1);
    }

    #[test]
    fn test_child_type_attribute_written() {
        let doc = composite_to_doc(&sample_composite());
        let bounds = doc.child("Bounds").unwrap();
        assert_eq!(bounds.attr("type"), Some("Composite"));
        let children = bounds.child("Children").unwrap();
        let tags: Vec<&str> = children
            .items()
            .map(|i| i.attr("type").unwrap_or_default())
            .collect();
        assert_eq!(tags, vec!["Box", "GeometryBVH"]);
    }

    #[test]
    fn test_unknown_polygon_tag_rejected() {
        let node = DocNode::new("Torus").with_attr("m", 0u32);
        assert!(matches!(
            polygon_from_node(&node),
            Err(BoundError::UnknownPolygonTag(_))
        ));
    }

    #[test]
    fn test_decoded_text_round_trip() {
        let composite = sample_composite();
        let text = rage_doc::write_tree(&composite_to_doc(&composite));
        let doc = rage_doc::read_tree(&text).unwrap();
        let back = composite_from_doc(&doc).unwrap();
        assert_eq!(back.children.len(), composite.children.len());
    }
}
