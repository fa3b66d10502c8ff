use std::sync::OnceLock;
use winreg::enums::HKEY_LOCAL_MACHINE;
use winreg::RegKey;

/// Gets Windows version information from the registry
pub fn get_windows_version() -> Option<(String, u32)> {
    let rkey = RegKey::predef(HKEY_LOCAL_MACHINE)
        .open_subkey(r"SOFTWARE\Microsoft\Windows NT\CurrentVersion")
        .ok()?;
    
    let product_name: String = rkey.get_value("ProductName").ok()?;
    let build: String = rkey.get_value("CurrentBuild").ok()?;
    let build_number = build.parse::<u32>().ok()?;
    
    Some((product_name, build_number))
}

/// Checks if the current Windows version is Windows 11 or newer
pub fn is_windows_11_or_newer() -> bool {
    static IS_WINDOWS_11: OnceLock<bool> = OnceLock::new();
    *IS_WINDOWS_11.get_or_init(|| {
        if let Some((_, build)) = get_windows_version() {
            // Windows 11 has build number 22000 or higher
            build >= 22000
        } else {
            false
        }
    })
}

/// Gets the Windows display name
pub fn get_windows_display_name() -> Option<String> {
    let rkey = RegKey::predef(HKEY_LOCAL_MACHINE)
        .open_subkey(r"SOFTWARE\Microsoft\Windows NT\CurrentVersion")
        .ok()?;
    
    let display_version: Result<String, _> = rkey.get_value("DisplayVersion");
    let product_name: String = rkey.get_value("ProductName").ok()?;
    
    if let Ok(display_version) = display_version {
        Some(format!("{} ({})", product_name, display_version))
    } else {
        Some(product_name)
    }
}

/// Gets the Windows build number as a string
pub fn get_windows_build_string() -> Option<String> {
    let rkey = RegKey::predef(HKEY_LOCAL_MACHINE)
        .open_subkey(r"SOFTWARE\Microsoft\Windows NT\CurrentVersion")
        .ok()?;
    
    rkey.get_value("CurrentBuild").ok()
}

/// Gets the Windows UBR (Update Build Revision) number
pub fn get_windows_ubr() -> Option<u32> {
    let rkey = RegKey::predef(HKEY_LOCAL_MACHINE)
        .open_subkey(r"SOFTWARE\Microsoft\Windows NT\CurrentVersion")
        .ok()?;
    
    rkey.get_value("UBR").ok()
}

/// Gets the full Windows build number including UBR
pub fn get_full_build_number() -> Option<String> {
    let build = get_windows_build_string()?;
    let ubr = get_windows_ubr()?;
    
    Some(format!("{}.{}", build, ubr))
}
