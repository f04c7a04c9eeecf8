use std::path::Path;

use rand::RngCore;
use tracing::warn;

use super::forms::UploadedFile;

const IMAGE_EXTENSIONS: &[&str] = &["bmp", "gif", "jpeg", "jpg", "png", "webp"];

pub const POST_IMAGES_DIR: &str = "post_images";

/// Lowercased extension of an image file name
pub fn image_extension(file_name: &str) -> Option<String> {
    let (_, extension) = file_name.rsplit_once('.')?;
    let extension = extension.to_lowercase();
    IMAGE_EXTENSIONS
        .contains(&extension.as_str())
        .then_some(extension)
}

/// Writes an uploaded image under `media_root` with a random name and
/// returns its path relative to `media_root`.
pub async fn save_post_image(media_root: &Path, file: &UploadedFile) -> std::io::Result<String> {
    let extension = image_extension(&file.file_name).unwrap_or_else(|| "bin".to_string());
    let mut name = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut name);
    let name: String = name.iter().map(|b| format!("{b:02x}")).collect();

    let relative = format!("{POST_IMAGES_DIR}/{name}.{extension}");
    tokio::fs::create_dir_all(media_root.join(POST_IMAGES_DIR)).await?;
    tokio::fs::write(media_root.join(&relative), &file.content).await?;
    Ok(relative)
}

/// Removes an image written by `save_post_image` whose post was never saved.
/// A file that cannot be removed is only logged.
pub async fn remove_post_image(media_root: &Path, image: &str) {
    if let Err(e) = tokio::fs::remove_file(media_root.join(image)).await {
        warn!("Could not remove image {image} : {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_image_extensions_pass() {
        assert_eq!(image_extension("cat.PNG"), Some("png".to_string()));
        assert_eq!(image_extension("archive.tar.gz"), None);
        assert_eq!(image_extension("noextension"), None);
    }
}
