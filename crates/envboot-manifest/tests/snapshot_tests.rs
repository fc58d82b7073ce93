use envboot_manifest::{Format, Manifest, Target, extract, render_text};

const MANIFEST: &str = r#"
[custom.tool.conda.gpu-dependencies]
numpy = "^1.16"
cupy = "~7.0"
cudatoolkit = ">=10.1,<10.2"
pytest = "*"
tvm = { version = "^0.7", channel = "pip" }
"#;

#[test]
fn snapshot_gpu_section_for_conda() {
    let manifest = Manifest::parse(MANIFEST, Format::Toml).unwrap();
    let records = extract(&manifest, "custom.tool.conda.gpu-dependencies").unwrap();

    insta::assert_snapshot!(render_text(&records, Target::Conda), @r###"
    numpy=1.16
    cupy=7.0
    cudatoolkit>=10.1,<10.2
    pytest
    tvm=0.7
    "###);
}

#[test]
fn snapshot_gpu_section_for_pip() {
    let manifest = Manifest::parse(MANIFEST, Format::Toml).unwrap();
    let records = extract(&manifest, "custom.tool.conda.gpu-dependencies").unwrap();

    insta::assert_snapshot!(render_text(&records, Target::Pip), @r###"
    numpy>=1.16,<2
    cupy>=7.0,<7.1
    cudatoolkit>=10.1,<10.2
    pytest
    tvm>=0.7,<0.8
    "###);
}
