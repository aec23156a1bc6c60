fn main() {
    println!("cargo:rerun-if-changed=schema.graphql");

    cynic_codegen::register_schema("social")
        .from_sdl_file("schema.graphql")
        .expect("the backend schema must exist")
        .as_default()
        .expect("the backend schema must be valid");
}
