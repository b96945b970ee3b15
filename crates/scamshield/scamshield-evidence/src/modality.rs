//! Modality detection from MIME type and file extension.

use scamshield_core::models::Modality;

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "gif", "bmp"];
const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "m4a", "ogg", "flac", "aac", "webm"];
const TEXT_EXTENSIONS: &[&str] = &["txt", "text", "csv", "json", "md", "log", "eml", "html"];

/// Lowercased extension of `filename`, if any.
pub fn extension(filename: &str) -> Option<String> {
    let (stem, ext) = filename.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Decide the modality of an upload. The MIME type wins when it names a
/// known top-level type; otherwise the extension decides.
pub fn detect(filename: &str, mime_type: Option<&str>) -> Option<Modality> {
    if let Some(mime) = mime_type {
        let mime = mime.trim().to_ascii_lowercase();
        if mime.starts_with("image/") {
            return Some(Modality::Image);
        }
        if mime.starts_with("audio/") {
            return Some(Modality::Audio);
        }
        if mime.starts_with("text/") || mime == "application/json" {
            return Some(Modality::Text);
        }
    }

    let ext = extension(filename)?;
    let ext = ext.as_str();
    if IMAGE_EXTENSIONS.contains(&ext) {
        Some(Modality::Image)
    } else if AUDIO_EXTENSIONS.contains(&ext) {
        Some(Modality::Audio)
    } else if TEXT_EXTENSIONS.contains(&ext) {
        Some(Modality::Text)
    } else {
        None
    }
}

/// MIME type to send to an extractor when the upload didn't declare one.
pub fn infer_mime(filename: &str, modality: Modality) -> String {
    let ext = extension(filename).unwrap_or_default();
    let mime = match (modality, ext.as_str()) {
        (Modality::Image, "jpg" | "jpeg") => "image/jpeg",
        (Modality::Image, "webp") => "image/webp",
        (Modality::Image, "gif") => "image/gif",
        (Modality::Image, "bmp") => "image/bmp",
        (Modality::Image, _) => "image/png",
        (Modality::Audio, "wav") => "audio/wav",
        (Modality::Audio, "m4a") => "audio/mp4",
        (Modality::Audio, "ogg") => "audio/ogg",
        (Modality::Audio, "flac") => "audio/flac",
        (Modality::Audio, "aac") => "audio/aac",
        (Modality::Audio, "webm") => "audio/webm",
        (Modality::Audio, _) => "audio/mp3",
        (Modality::Text, "json") => "application/json",
        (Modality::Text, "csv") => "text/csv",
        (Modality::Text, "html") => "text/html",
        (Modality::Text, _) => "text/plain",
    };
    mime.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_type_takes_precedence() {
        assert_eq!(detect("note.txt", Some("image/png")), Some(Modality::Image));
        assert_eq!(detect("blob", Some("audio/mpeg")), Some(Modality::Audio));
        assert_eq!(detect("blob", Some("text/plain")), Some(Modality::Text));
    }

    #[test]
    fn extension_decides_without_useful_mime() {
        assert_eq!(detect("Screenshot.PNG", None), Some(Modality::Image));
        assert_eq!(detect("call.m4a", Some("application/octet-stream")), Some(Modality::Audio));
        assert_eq!(detect("chat.eml", None), Some(Modality::Text));
    }

    #[test]
    fn unknown_types_are_rejected() {
        assert_eq!(detect("archive.zip", None), None);
        assert_eq!(detect("no_extension", None), None);
        assert_eq!(detect(".png", None), None);
    }

    #[test]
    fn audio_mime_inference() {
        assert_eq!(infer_mime("a.mp3", Modality::Audio), "audio/mp3");
        assert_eq!(infer_mime("a.wav", Modality::Audio), "audio/wav");
        assert_eq!(infer_mime("a.m4a", Modality::Audio), "audio/mp4");
        assert_eq!(infer_mime("a.jpg", Modality::Image), "image/jpeg");
    }
}
