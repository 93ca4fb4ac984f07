//! Packing SVG files from disk into an MSVG container.

use std::fs;

use msvg::pack::{pack_directory, pack_to_file, PackOptions};
use msvg::render::FailureKind;

#[test]
fn test_pack_directory_orders_by_number() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("page10.svg"), r#"<svg id="p10" viewBox="0 0 1 1"/>"#).unwrap();
    fs::write(dir.path().join("page2.svg"), r#"<svg id="p2" viewBox="0 0 1 1"/>"#).unwrap();
    fs::write(
        dir.path().join("page1.svg"),
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<svg id=\"p1\" viewBox=\"0 0 2 1\"/>",
    )
    .unwrap();
    fs::write(dir.path().join("readme.txt"), "not a page").unwrap();
    fs::create_dir(dir.path().join("nested.svg")).unwrap();

    let packed = pack_directory(dir.path(), &PackOptions::default()).unwrap();

    assert_eq!(packed.pages, vec!["page1.svg", "page2.svg", "page10.svg"]);
    assert!(packed.skipped.is_empty());
    assert!(!packed.content.contains("<?xml"));
    assert!(!packed.content.contains("not a page"));
}

#[test]
fn test_packed_container_renders_every_page() {
    let dir = tempfile::tempdir().unwrap();
    for i in 1..=4 {
        fs::write(
            dir.path().join(format!("{}.svg", i)),
            format!(r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 {}"/>"#, i * 100),
        )
        .unwrap();
    }

    let packed = pack_directory(dir.path(), &PackOptions::default()).unwrap();
    let result = msvg::render(&packed.content);

    let heights: Vec<f64> = result.pages().iter().map(|p| p.height()).collect();
    assert_eq!(heights, vec![900.0, 1800.0, 2700.0, 3600.0]);
}

#[test]
fn test_unreadable_file_is_skipped() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("1.svg"), "<svg/>").unwrap();
    fs::write(dir.path().join("2.svg"), [0xff_u8, 0xfe, 0x00]).unwrap();

    let packed = pack_directory(dir.path(), &PackOptions::default()).unwrap();

    assert_eq!(packed.page_count(), 1);
    assert_eq!(packed.skipped.len(), 1);
    assert!(packed.skipped[0].ends_with("2.svg"));
}

#[test]
fn test_pack_to_file_writes_output() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a1.svg"), "<svg/>").unwrap();
    let output = dir.path().join("out.msvg");

    let packed = pack_to_file(dir.path(), &output, &PackOptions::default()).unwrap();

    assert_eq!(fs::read_to_string(&output).unwrap(), packed.content);
    assert!(packed.content.starts_with("<MSVG version=\"1.0\">\r\n"));
    assert!(packed.content.ends_with("</MSVG>\r\n"));
}

#[test]
fn test_pack_to_file_without_inputs_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.msvg");

    assert!(pack_to_file(dir.path(), &output, &PackOptions::default()).is_err());
    assert!(!output.exists());
}

#[test]
fn test_empty_container_has_nothing_to_render() {
    let dir = tempfile::tempdir().unwrap();
    let packed = pack_directory(dir.path(), &PackOptions::default()).unwrap();
    let result = msvg::render(&packed.content);
    assert_eq!(result.failure_kind(), Some(FailureKind::NoRenderableContent));
}
