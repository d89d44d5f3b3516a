use crate::models::materials::entities::MaterialType;

/// 验证文件内容的魔术字节是否与扩展名匹配
///
/// # Arguments
/// * `data` - 文件内容的前几个字节
/// * `extension` - 文件扩展名（包含点号，如 ".png"）
///
/// # Returns
/// * `true` - 魔术字节匹配或该类型不需要验证
/// * `false` - 魔术字节不匹配
pub fn validate_magic_bytes(data: &[u8], extension: &str) -> bool {
    if data.is_empty() {
        return false;
    }

    match extension.to_lowercase().as_str() {
        // 图片格式
        ".png" => data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]),
        ".jpg" | ".jpeg" => data.starts_with(&[0xFF, 0xD8, 0xFF]),
        ".gif" => data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a"),
        ".webp" => data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP",
        ".bmp" => data.starts_with(b"BM"),
        ".ico" => data.starts_with(&[0x00, 0x00, 0x01, 0x00]),

        // 文档格式
        ".pdf" => data.starts_with(b"%PDF"),
        ".doc" | ".xls" | ".ppt" => {
            // MS Office 旧格式 (OLE Compound Document)
            data.starts_with(&[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1])
        }
        ".docx" | ".xlsx" | ".pptx" => {
            // MS Office 新格式 (ZIP-based OOXML)
            data.starts_with(&[0x50, 0x4B, 0x03, 0x04])
        }

        // 压缩格式
        ".zip" => data.starts_with(&[0x50, 0x4B, 0x03, 0x04]),
        ".rar" => data.starts_with(b"Rar!"),
        ".7z" => data.starts_with(&[0x37, 0x7A, 0xBC, 0xAF, 0x27, 0x1C]),
        ".gz" | ".gzip" => data.starts_with(&[0x1F, 0x8B]),

        // 音视频格式
        ".mp4" | ".mov" => data.len() >= 8 && &data[4..8] == b"ftyp",
        ".webm" | ".mkv" => data.starts_with(&[0x1A, 0x45, 0xDF, 0xA3]),
        ".mp3" => data.starts_with(b"ID3") || data.starts_with(&[0xFF, 0xFB]),

        // 文本格式 - 不检查魔术字节
        ".txt" | ".md" | ".csv" | ".json" => true,

        // 未知格式 - 默认拒绝
        _ => false,
    }
}

/// 根据扩展名推断资料类型
pub fn material_type_for_extension(extension: &str) -> MaterialType {
    match extension.to_lowercase().as_str() {
        ".mp4" | ".mov" | ".webm" | ".mkv" | ".mp3" => MaterialType::Video,
        ".pdf" | ".doc" | ".docx" | ".ppt" | ".pptx" | ".xls" | ".xlsx" | ".txt" | ".md"
        | ".csv" | ".json" => MaterialType::Document,
        _ => MaterialType::Other,
    }
}

/// 提取文件名中的扩展名（包含点号，小写）
pub fn file_extension(file_name: &str) -> Option<String> {
    std::path::Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_png_magic() {
        let png_header = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        assert!(validate_magic_bytes(&png_header, ".png"));
        assert!(validate_magic_bytes(&png_header, ".PNG"));
        assert!(!validate_magic_bytes(&png_header, ".jpg"));
    }

    #[test]
    fn test_jpeg_magic() {
        let jpeg_header = [0xFF, 0xD8, 0xFF, 0xE0];
        assert!(validate_magic_bytes(&jpeg_header, ".jpg"));
        assert!(validate_magic_bytes(&jpeg_header, ".jpeg"));
        assert!(!validate_magic_bytes(&jpeg_header, ".png"));
    }

    #[test]
    fn test_pdf_magic() {
        let pdf_header = b"%PDF-1.4";
        assert!(validate_magic_bytes(pdf_header, ".pdf"));
        assert!(!validate_magic_bytes(pdf_header, ".doc"));
    }

    #[test]
    fn test_text_files() {
        let text_content = b"Hello, World!";
        assert!(validate_magic_bytes(text_content, ".txt"));
        assert!(validate_magic_bytes(text_content, ".md"));
        assert!(validate_magic_bytes(text_content, ".json"));
    }

    #[test]
    fn test_empty_data() {
        assert!(!validate_magic_bytes(&[], ".png"));
        assert!(!validate_magic_bytes(&[], ".txt"));
    }

    #[test]
    fn test_media_magic() {
        let mp4 = [0x00, 0x00, 0x00, 0x18, b'f', b't', b'y', b'p', b'm', b'p', b'4', b'2'];
        assert!(validate_magic_bytes(&mp4, ".mp4"));
        assert!(!validate_magic_bytes(b"%PDF-1.7", ".mp4"));
        assert!(validate_magic_bytes(b"ID3\x04", ".mp3"));
    }

    #[test]
    fn test_material_type_for_extension() {
        assert_eq!(material_type_for_extension(".MP4"), MaterialType::Video);
        assert_eq!(material_type_for_extension(".pdf"), MaterialType::Document);
        assert_eq!(material_type_for_extension(".zip"), MaterialType::Other);
    }

    #[test]
    fn test_file_extension() {
        assert_eq!(file_extension("Lecture 1.PDF").as_deref(), Some(".pdf"));
        assert_eq!(file_extension("archive.tar.gz").as_deref(), Some(".gz"));
        assert_eq!(file_extension("README"), None);
    }

    #[test]
    fn test_unknown_extension() {
        let data = [0x00, 0x01, 0x02, 0x03];
        assert!(!validate_magic_bytes(&data, ".exe"));
        assert!(!validate_magic_bytes(&data, ".unknown"));
    }
}
