use super::*;

fn text(s: &str) -> VisualNode {
    VisualNode::Text(TextNode {
        text: s.to_string(),
        color: Rgba8::rgb(0, 255, 0),
        size: 32.0,
        opacity: 1.0,
        transform: Transform2D::default(),
    })
}

fn tree() -> VisualTree {
    VisualTree {
        frame: FrameIndex(12),
        canvas: Canvas {
            width: 1080,
            height: 1920,
        },
        background: None,
        scenes: vec![
            SceneNode {
                name: "hook".to_string(),
                index: 0,
                relative_frame: 12,
                nodes: vec![
                    text("How does GPT"),
                    VisualNode::Group(GroupNode {
                        anchor: Some(Point::new(50.0, 50.0)),
                        opacity: 0.5,
                        transform: Transform2D::scale(1.2),
                        children: vec![text("774M"), text("PARAMS")],
                    }),
                ],
            },
            SceneNode {
                name: "cta".to_string(),
                index: 1,
                relative_frame: 0,
                nodes: vec![text("Follow")],
            },
        ],
        audio: vec![],
    }
}

#[test]
fn node_count_includes_group_children() {
    assert_eq!(tree().node_count(), 5);
}

#[test]
fn scene_lookup_by_name() {
    let t = tree();
    assert_eq!(t.scene("cta").map(|s| s.index), Some(1));
    assert!(t.scene("missing").is_none());
}

#[test]
fn empty_fields_are_omitted() {
    let v = serde_json::to_value(tree()).unwrap();
    assert!(v.get("background").is_none());
    assert!(v.get("audio").is_none());
    assert_eq!(v["scenes"][0]["nodes"][1]["kind"], "group");
    assert_eq!(v["scenes"][0]["nodes"][1]["children"][0]["text"], "774M");
}
