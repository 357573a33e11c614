fn main() {
    quench_build::Generator::from_env()
        .expect("quench requires the cargo build-script environment")
        .generate()
        .expect("one-shot codegen failed");
}
