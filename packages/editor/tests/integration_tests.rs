//! End-to-end session scenarios: parse, edit, undo/redo, clipboard,
//! regenerate.

use pagecraft_codegen::CodegenOptions;
use pagecraft_editor::{DropPosition, EditorSession, ImportRegistry, Node};

fn open(source: &str) -> EditorSession {
    EditorSession::open(source, ImportRegistry::new(), CodegenOptions::default()).unwrap()
}

#[test]
fn parse_then_regenerate_trivial_component() {
    let session = open(r#"return <div className="a"><p>Hi</p></div>;"#);

    let root = session.tree().unwrap().as_element().unwrap();
    assert_eq!(root.tag, "div");
    assert_eq!(root.class_name.as_deref(), Some("a"));
    let p = root.children[0].as_element().unwrap();
    assert_eq!(p.tag, "p");
    assert_eq!(p.text_content.as_deref(), Some("Hi"));

    let generated = session.generate();
    assert!(generated.contains("<div className=\"a\">"));
    assert!(generated.contains("<p>Hi</p>"));
    assert!(generated.contains("</div>"));
}

#[test]
fn add_then_delete_restores_original_tree() {
    let mut session = open(r#"return <div className="a"><p>Hi</p></div>;"#);
    let original = session.tree().unwrap().clone();
    let root_id = original.id().to_string();

    let with_span = session.add_element(&root_id, "span", None).unwrap().clone();
    assert_eq!(with_span.children().len(), 2);

    let span_id = with_span.children()[1].id().to_string();
    session.delete_element(&span_id).unwrap();

    assert_eq!(session.tree().unwrap(), &original);
}

#[test]
fn undo_restores_pre_op_tree_and_redo_restores_post_op() {
    let mut session = open("return <div><p>One</p></div>;");
    let before = session.tree().unwrap().clone();
    let root_id = before.id().to_string();

    session.add_element(&root_id, "span", None);
    let after = session.tree().unwrap().clone();
    assert_ne!(before, after);

    assert!(session.undo());
    assert_eq!(session.tree().unwrap(), &before);

    assert!(session.redo());
    assert_eq!(session.tree().unwrap(), &after);
}

#[test]
fn undo_redo_boundaries_are_noops() {
    let mut session = open("return <div></div>;");

    assert!(!session.undo());
    assert!(!session.redo());

    let root_id = session.tree().unwrap().id().to_string();
    session.add_element(&root_id, "p", None);
    assert!(session.can_undo());
    assert!(session.undo());
    assert!(!session.undo(), "second undo must hit the seed boundary");
    assert!(session.can_redo());
}

#[test]
fn new_edit_discards_redo_states() {
    let mut session = open("return <div></div>;");
    let root_id = session.tree().unwrap().id().to_string();

    session.add_element(&root_id, "p", None);
    session.undo();
    assert!(session.can_redo());

    session.add_element(&root_id, "span", None);
    assert!(!session.can_redo());

    let root = session.tree().unwrap().as_element().unwrap();
    assert_eq!(root.children.len(), 1);
    assert_eq!(root.children[0].as_element().unwrap().tag, "span");
}

#[test]
fn stale_clipboard_paste_is_a_noop() {
    let mut session = open("return <div><p id=\"x\">Hi</p><span id=\"y\">S</span></div>;");

    session.copy("x");
    session.delete_element("x").unwrap();
    let before = session.tree().unwrap().clone();

    // Paste of the deleted id: no new node, no panic, nothing committed.
    assert!(session.paste().is_none());
    assert_eq!(session.tree().unwrap(), &before);
}

#[test]
fn copy_paste_duplicates_in_place() {
    let mut session = open("return <div><p id=\"x\">Hi</p></div>;");

    session.copy("x");
    assert_eq!(session.copied_node(), Some("x"));
    let pasted = session.paste().unwrap().clone();

    let root = pasted.as_element().unwrap();
    assert_eq!(root.children.len(), 2);
    let copy = root.children[1].as_element().unwrap();
    assert_eq!(copy.tag, "p");
    assert_eq!(copy.text_content.as_deref(), Some("Hi"));
    assert_ne!(copy.id, "x");
}

#[test]
fn preamble_survives_edits_and_saves() {
    let source = "const greeting = makeGreeting();\nconst twice = greeting + greeting;\nreturn <p>{greeting}</p>;";
    let mut session = open(source);

    assert_eq!(
        session.preamble(),
        "const greeting = makeGreeting();\nconst twice = greeting + greeting;"
    );

    let root_id = session.tree().unwrap().id().to_string();
    session.add_element(&root_id, "span", None);

    let generated = session.generate();
    assert!(generated.contains("  const greeting = makeGreeting();"));
    assert!(generated.contains("  const twice = greeting + greeting;"));
}

#[test]
fn add_to_root_wraps_in_fragment_and_generates_both_siblings() {
    let mut session = open("return <section><h1>Hero</h1></section>;");

    let tree = session.add_element_to_root("footer").unwrap();
    assert!(tree.is_root_fragment());
    assert_eq!(tree.children().len(), 2);

    let generated = session.generate();
    assert!(generated.contains("<section>"));
    assert!(generated.contains("<footer></footer>"));
}

#[test]
fn drag_and_drop_then_save_round_trip() {
    let mut session = open(
        "return <div id=\"root\"><ul id=\"list\"><li id=\"a\">A</li></ul><p id=\"intro\">Intro</p></div>;",
    );

    session.move_element("intro", "list", DropPosition::Before);
    let generated = session.generate();

    let intro_at = generated.find("<p>Intro</p>").unwrap();
    let list_at = generated.find("<ul>").unwrap();
    assert!(intro_at < list_at, "intro must be generated before the list");

    // The generated body parses back into an equivalent structure.
    let reopened = open(&format!(
        "return (\n{});",
        strip_component_wrapper(&generated)
    ));
    let root = reopened.tree().unwrap();
    assert_eq!(root.children().len(), 2);
    assert_eq!(
        root.children()[0].as_element().unwrap().text_content.as_deref(),
        Some("Intro")
    );
}

fn strip_component_wrapper(module: &str) -> String {
    // Pull the markup back out of `return ( ... );` for re-parsing.
    let start = module.find("return (").unwrap() + "return (".len();
    let end = module.rfind(");").unwrap();
    module[start..end].to_string()
}

#[test]
fn generate_emits_imports_for_added_components() {
    let mut session = open("return <div></div>;");
    let root_id = session.tree().unwrap().id().to_string();

    let descriptor = pagecraft_editor::ComponentDescriptor {
        package_name: "lucide-react".to_string(),
        import_name: "Github".to_string(),
        import_type: pagecraft_parser::ImportType::Named,
        kind: pagecraft_editor::ComponentKind::Icon,
    };
    session.add_component(&root_id, &descriptor);

    let generated = session.generate();
    assert!(generated.contains("import { DynamicIcon } from \"lucide-react/dynamic\";"));
    assert!(generated.contains("<DynamicIcon name=\"github\" size={24} />"));
}

#[test]
fn session_survives_a_hostile_sequence() {
    let mut session = open("return <div><p id=\"x\">Hi</p></div>;");

    session.delete_element("nope");
    session.move_element("x", "x", DropPosition::Inside);
    session.duplicate_element("missing");
    session.copy("ghost");
    session.paste();
    assert!(!session.undo());

    // Still a valid, generable tree.
    let generated = session.generate();
    assert!(generated.contains("<p>Hi</p>"));

    match session.tree().unwrap() {
        Node::Element(root) => assert_eq!(root.children.len(), 1),
        other => panic!("unexpected root {:?}", other),
    }
}
