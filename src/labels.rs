//! Hard-coded display strings (Traditional Chinese).

/// Label of the synthetic "no restriction" filter category.
pub const ALL_CATEGORIES: &str = "全部";

pub const SKILLS_HEADING: &str = "技能專長";
pub const CONTACT_ME: &str = "聯絡我";
pub const DOWNLOAD_RESUME: &str = "下載履歷";

pub const NAME_LOADING: &str = "姓名載入中...";
pub const TITLE_LOADING: &str = "職稱載入中...";
/// Shown in place of a broken avatar image.
pub const AVATAR_FALLBACK: &str = "👨‍💻";

pub const NO_PROJECTS: &str = "暫無作品展示";
pub const NO_MEDIA: &str = "無媒體內容";
pub const VIDEO_UNSUPPORTED: &str = "您的瀏覽器不支援影片播放";
pub const VIDEO_FAILED: &str = "影片載入失敗";
pub const MEDIA_FORMAT_FAILED: &str = "無法載入媒體格式";
pub const MEDIA_ALT: &str = "專案媒體";

pub const CATEGORY_PREFIX: &str = "分類：";
pub const DATE_PREFIX: &str = "日期：";
pub const GITHUB: &str = "GitHub";
pub const DEMO: &str = "Demo";

pub const LOAD_FAILED: &str = "無法載入設定檔，請確認所有配置檔存在且格式正確";
pub const INIT_FAILED: &str = "網站初始化失敗，請檢查設定檔格式";

/// Display name for a skill category key, falling back to the key itself.
pub fn skill_category(key: &str) -> &str {
    match key {
        "programming" => "程式語言 / 自動化開發語言",
        "tools" => "自動化測試工具",
        "management" => "測試管理 / 規劃工具",
        "control" => "版本控制 / CI",
        "types" => "測試類型",
        other => other,
    }
}
