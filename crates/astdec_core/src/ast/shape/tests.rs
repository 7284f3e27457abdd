use crate::ast::{DecodeError, FieldDescriptor, FieldType, Shape, ShapeRegistry, ShapeTable, pick_tag_for_field};

fn registry() -> ShapeTable {
	ShapeTable::from_shapes([
		Shape::new("Leaf", vec![FieldDescriptor::pinned("value", "integer")]),
		Shape::new("Node", vec![FieldDescriptor::pinned("child", "object")]),
	])
	.expect("shapes register")
}

#[test]
fn pinned_tags_are_used_as_declared() {
	let shapes = registry();
	assert_eq!(pick_tag_for_field(&FieldDescriptor::pinned("x", "Leaf"), &shapes), "Leaf");
	assert_eq!(pick_tag_for_field(&FieldDescriptor::pinned("x", "string"), &shapes), "string");
	assert_eq!(pick_tag_for_field(&FieldDescriptor::pinned("x", "Unregistered"), &shapes), "Unregistered");
}

#[test]
fn nullable_single_member_union_keeps_member() {
	let shapes = registry();
	assert_eq!(pick_tag_for_field(&FieldDescriptor::union("x", &["null", "Leaf"]), &shapes), "Leaf");
	assert_eq!(pick_tag_for_field(&FieldDescriptor::union("x", &["string", "null"]), &shapes), "string");
}

#[test]
fn shape_unions_collapse_to_object() {
	let shapes = registry();
	assert_eq!(pick_tag_for_field(&FieldDescriptor::union("x", &["Leaf", "Node", "null"]), &shapes), "object");
}

#[test]
fn mixed_unions_collapse_to_any() {
	let shapes = registry();
	assert_eq!(pick_tag_for_field(&FieldDescriptor::union("x", &["Leaf", "integer"]), &shapes), "any");
	assert_eq!(pick_tag_for_field(&FieldDescriptor::union("x", &["null"]), &shapes), "any");
	assert_eq!(pick_tag_for_field(&FieldDescriptor::union("x", &[]), &shapes), "any");
}

#[test]
fn rejects_duplicate_shapes() {
	let err = ShapeTable::from_shapes([Shape::new("Leaf", Vec::new()), Shape::new("Leaf", Vec::new())]).expect_err("duplicate");
	assert!(matches!(err, DecodeError::DuplicateShape { ref name } if name == "Leaf"));
}

#[test]
fn parses_json_registry() {
	let shapes = ShapeTable::from_json(
		r#"{
			"shapeKey": "kind",
			"shapes": [
				{"name": "Leaf", "fields": [{"name": "value", "type": "integer"}]},
				{"name": "Pair", "fields": [
					{"name": "left", "type": ["Leaf", "null"]},
					{"name": "right", "type": "Leaf"}
				]}
			]
		}"#,
	)
	.expect("json parses");

	assert_eq!(shapes.shape_key(), "kind");
	assert_eq!(shapes.len(), 2);
	let names: Vec<&str> = shapes.iter().map(|shape| shape.name.as_ref()).collect();
	assert_eq!(names, vec!["Leaf", "Pair"]);

	let pair = shapes.shape("Pair").expect("pair registered");
	assert_eq!(pair.fields[0].ty, FieldType::Union(vec!["Leaf".into(), "null".into()]));
	assert_eq!(pair.fields[1].ty, FieldType::Tag("Leaf".into()));
}

#[test]
fn json_shape_key_defaults_to_type() {
	let shapes = ShapeTable::from_json(r#"{"shapes": []}"#).expect("json parses");
	assert_eq!(shapes.shape_key(), "type");
	assert!(shapes.is_empty());
}
