//! Persian strings
//!
//! Keys without an entry here fall back to English.

use super::Key;

pub(super) fn lookup(key: Key) -> Option<&'static str> {
    let s = match key {
        Key::AppTitle => "هوشمند کاشف داده",
        Key::AppDescription => "پروژه‌ات را توصیف کن تا هوش مصنوعی داده‌های لازم را پیدا کند.",
        Key::ToggleLanguage => "English",
        Key::TabSearch => "یافتن داده",
        Key::TabScraper => "استخراج از وب",
        Key::TabSettings => "تنظیمات",
        Key::TabHelp => "راهنما",

        Key::ProjectDescriptionLabel => "پروژه‌ات را توصیف کن",
        Key::ProjectDescriptionPlaceholder => {
            "مثلاً: می‌خواهم مدلی بسازم که شراره‌های خورشیدی را از تصاویر ماهواره‌ای پیش‌بینی کند"
        }
        Key::SearchingButton => "در حال جستجو...",
        Key::FindDataSourcesButton => "یافتن منابع داده",
        Key::SuggestedDataSources => "منابع داده پیشنهادی",
        Key::NoSourcesFound => "هوش مصنوعی منبعی پیشنهاد نکرد. توضیح دقیق‌تری بنویس.",
        Key::ErrorPrompt => "لطفاً ابتدا پروژه‌ات را توصیف کن.",
        Key::ErrorAi => "هوش مصنوعی در حال حاضر نتوانست منبع داده‌ای پیدا کند. دوباره تلاش کن.",

        Key::AccessMethod => "روش دسترسی:",
        Key::GetDetailsButton => "جزئیات",
        Key::HideDetailsButton => "پنهان کردن جزئیات",
        Key::LoadingDetails => "در حال دریافت جزئیات...",
        Key::DataFormatsLabel => "قالب‌های داده",
        Key::UpdateFrequencyLabel => "دفعات به‌روزرسانی",
        Key::UsageRestrictionsLabel => "محدودیت‌های استفاده",
        Key::DocumentationLabel => "مستندات",
        Key::FollowUpPrompt => "یک سؤال تکمیلی درباره این منبع بپرس",
        Key::FollowUpPlaceholder => "مثلاً: آیا داده‌های تاریخی هم دارد؟",
        Key::AskButton => "بپرس",
        Key::Asking => "در حال پرسیدن...",
        Key::QuestionPrefix => "س",
        Key::AnswerPrefix => "ج",
        Key::ProgrammingLanguage => "زبان",
        Key::GenerateCodeButton => "تولید کد",
        Key::GeneratingCodeButton => "در حال تولید...",
        Key::ErrorCodeGeneration => "تولید کد ناموفق بود. دوباره تلاش کن.",
        Key::ErrorDetails => "بارگذاری جزئیات این منبع ممکن نشد.",
        Key::ErrorFollowUp => "پاسخ به سؤالت ممکن نشد. دوباره تلاش کن.",

        Key::Copy => "کپی",
        Key::Copied => "کپی شد!",
        Key::CopyError => "کپی ناموفق بود",
        Key::SaveSnippet => "ذخیره",
        Key::SnippetSaved => "کد ذخیره شد در",
        Key::SnippetSaveFailed => "ذخیره کد ممکن نشد",
        Key::NoCodeYet => "هنوز کدی تولید نشده",

        Key::WebScraperTitle => "تولیدکننده کد استخراج وب",
        Key::WebScraperDescription => {
            "نشانی صفحه را بده و داده مورد نظرت را توصیف کن؛ هوش مصنوعی کد استخراج را می‌نویسد."
        }
        Key::WebScraperUrlLabel => "نشانی صفحه",
        Key::WebScraperDataLabel => "داده مورد نظر",
        Key::WebScraperDataPlaceholder => "مثلاً: جدول دمای روزانه همراه با تاریخ و شهر",
        Key::GenerateScrapingCodeButton => "تولید کد استخراج",
        Key::ErrorScrapingPrompt => "لطفاً هم نشانی و هم توضیح داده را وارد کن.",

        Key::SettingsTheme => "پوسته",
        Key::SettingsLanguage => "زبان",
        Key::SettingsSaved => "تنظیمات ذخیره شد",
        Key::SaveFailed => "ذخیره ناموفق بود",
        Key::SettingsConfigPath => "فایل تنظیمات",
        Key::SettingsEditingHint => "تایپ کن · [Enter] ذخیره · [Esc] لغو",

        Key::StatusNavigate => "حرکت",
        Key::StatusQuit => "[q] خروج",
        Key::StatusEdit => "ویرایش",
        Key::StatusConfirm => "تأیید",
        Key::StatusBack => "بازگشت",
        Key::StatusScroll => "پیمایش",
        Key::StatusSwitchTab => "[1-2] تغییر زبانه",
        Key::StatusChange => "[Enter] تغییر",
        Key::StatusNextField => "فیلد بعدی",

        Key::HelpKeysTitle => "کلیدها",
        Key::HelpAboutTitle => "درباره",
        Key::HelpAbout => {
            "این برنامه با کمک هوش مصنوعی و جستجوی وب، مجموعه‌داده‌های مناسب پروژه‌ات را پیدا می‌کند \
             و در بررسی و نوشتن کد دریافت آن‌ها کمکت می‌کند."
        }
        Key::HelpEditDescription => "ویرایش توضیح پروژه",
        Key::HelpRunSearch => "جستجوی منابع داده",
        Key::HelpSelectSource => "انتخاب منبع داده",
        Key::HelpToggleDetails => "نمایش / پنهان کردن جزئیات",
        Key::HelpCycleLanguage => "تغییر زبان کد",
        Key::HelpGenerateCode => "تولید کد دسترسی",
        Key::HelpAskFollowUp => "پرسیدن سؤال تکمیلی",
        Key::HelpCopyCode => "کپی کد",
        Key::HelpSaveCode => "ذخیره کد در فایل",
        Key::HelpScrollCard => "پیمایش کارت",
        Key::HelpToggleUiLanguage => "تغییر زبان رابط",
        Key::HelpQuit => "خروج",

        // Technical labels stay English
        Key::SettingsModel | Key::SettingsTimeout | Key::WebScraperUrlPlaceholder => return None,
    };
    Some(s)
}
