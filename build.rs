fn main() {
    println!("cargo:rerun-if-env-changed=IRRIGATOR_AP_SSID");
    println!("cargo:rerun-if-env-changed=IRRIGATOR_AP_PASSWORD");
    println!("cargo:rerun-if-env-changed=IRRIGATOR_SENSOR_URL");
    println!("cargo:rerun-if-env-changed=IRRIGATOR_COMMAND_URL");

    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
