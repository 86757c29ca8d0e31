//! Page copy handed to the renderer and animators at mount.
//!
//! Defaults carry the CNJP Input landing page text. The animated strings
//! (hero title, intro paragraphs, demo input/output) can be overridden from the
//! `[content]` section of the config file.

/// One feature card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureCard {
    /// Small caps label above the title.
    pub highlight: String,
    /// Card title.
    pub title: String,
    /// Body text.
    pub desc: String,
}

/// One technical spec entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TechSpec {
    /// Spec title.
    pub title: String,
    /// Spec description.
    pub desc: String,
}

/// One keyboard shortcut row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shortcut {
    /// Action label.
    pub label: String,
    /// English label.
    pub en: String,
    /// Key caps, pressed together.
    pub keys: Vec<String>,
}

/// One footer link to another work by the author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkLink {
    /// Link title.
    pub title: String,
    /// Short description.
    pub desc: String,
}

/// Release status badge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusBadge {
    /// Badge text.
    pub label: String,
    /// Whether this platform is available.
    pub active: bool,
}

/// All text shown on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContent {
    /// Product name.
    pub site_name: String,
    /// English product name.
    pub en_name: String,
    /// Navigation labels.
    pub nav: Vec<String>,
    /// Download button label in the navbar.
    pub nav_download: String,
    /// Release badge above the hero title.
    pub hero_badge: String,
    /// Hero title line 1; target of the scramble reveal.
    pub hero_title: String,
    /// Hero title line 2; drawn as glow text.
    pub hero_tagline: String,
    /// Hero description paragraph.
    pub hero_description: String,
    /// Hero download button label.
    pub download_label: String,
    /// Intro section title.
    pub intro_title: String,
    /// Intro paragraphs; blocks of the sequential reveal.
    pub paragraphs: Vec<String>,
    /// Author name.
    pub author_name: String,
    /// Author role.
    pub author_role: String,
    /// Demo card label.
    pub demo_label: String,
    /// Demo card hint.
    pub demo_hint: String,
    /// Typed input of the typing simulation.
    pub demo_input: String,
    /// Typed output of the typing simulation.
    pub demo_output: String,
    /// Features section title.
    pub features_title: String,
    /// Features section subtitle.
    pub features_subtitle: String,
    /// Feature cards.
    pub features: Vec<FeatureCard>,
    /// Tech section title.
    pub tech_title: String,
    /// Tech specs.
    pub specs: Vec<TechSpec>,
    /// Shortcut panel title.
    pub shortcuts_title: String,
    /// Shortcut rows.
    pub shortcuts: Vec<Shortcut>,
    /// Tip under the shortcuts.
    pub shortcut_tip: String,
    /// Footer blurb.
    pub footer_desc: String,
    /// Links to other works.
    pub works: Vec<WorkLink>,
    /// WeChat id.
    pub contact_wechat: String,
    /// Contact email.
    pub contact_email: String,
    /// Platform status badges.
    pub status: Vec<StatusBadge>,
    /// Copyright line.
    pub copyright: String,
}

fn s(text: &str) -> String {
    text.to_string()
}

impl Default for PageContent {
    fn default() -> Self {
        Self {
            site_name: s("中日说"),
            en_name: s("CNJP Input"),
            nav: vec![s("开发初衷"), s("功能特性"), s("技术规格"), s("联系作者")],
            nav_download: s("立即下载"),
            hero_badge: s("v1.0 版本现已发布"),
            hero_title: s("极速语音识别"),
            hero_tagline: s("跨越语言鸿沟"),
            hero_description: s(
                "为不精通日语的你而生。打破翻译-复制-粘贴的繁琐循环，内置离线 AI 引擎，让交流如原生般流畅。",
            ),
            download_label: s("下载 Windows 版 v1.0"),
            intro_title: s("源自真实的痛点"),
            paragraphs: vec![
                s("“我本人日语不够好，在和日本朋友交流时，总是深陷在『打开翻译器 - 输入中文 - 复制译文 - 粘贴到聊天窗口』这种极其低效的循环中。”"),
                s("于是我决定动手，利用AI开发一个真正的“输入外挂”。它不是一个笨重的翻译软件，而是一个极简、提速、甚至可以离线使用的输入增强工具。"),
            ],
            author_name: s("中本蔡"),
            author_role: s("独立开发者 / Creator of CNJP Input"),
            demo_label: s("语音交互演示"),
            demo_hint: s("按住 [Win+Ctrl] 说话..."),
            demo_input: s("你好，很高兴认识你"),
            demo_output: s("こんにちは、はじめまして"),
            features_title: s("三大核心模式"),
            features_subtitle: s("不仅是输入法，更是你的中日交流僚机。"),
            features: vec![
                FeatureCard {
                    highlight: s("速度极致"),
                    title: s("中文 ASR 识别模式"),
                    desc: s("默认模式。对着麦克风说中文，极速识别并自动贴到输入框中。毫秒级响应，即使是日文或英文也能精准捕捉。"),
                },
                FeatureCard {
                    highlight: s("跨语对话"),
                    title: s("日语语音对话模式"),
                    desc: s("说中文，直接出日文。无感化交流，支持在设置中开启联网朗读，边聊天边学习地道发音。"),
                },
                FeatureCard {
                    highlight: s("即输即译"),
                    title: s("文字翻译直发模式"),
                    desc: s("在主界面输入中文，实时预览日文翻译。按下回车，日文即刻发送，化身输入框中的全能翻译官。"),
                },
            ],
            tech_title: s("顶尖性能表现"),
            specs: vec![
                TechSpec {
                    title: s("离线 AI 翻译引擎"),
                    desc: s("支持 nllb 智能 AI 翻译。下载约 600MB 本地模型后，无需联网即可享受私人、安全、极速的体验。"),
                },
                TechSpec {
                    title: s("双引擎灵活切换"),
                    desc: s("谷歌在线翻译（精准度高） vs nllb 离线翻译（速度快）。根据网络环境与需求自由切换。"),
                },
                TechSpec {
                    title: s("毫秒级贴词响应"),
                    desc: s("深度优化内存占用与识别流水线，识别完成即刻贴入目标窗口，延迟几乎为零。"),
                },
            ],
            shortcuts_title: s("快捷操作，指尖随行"),
            shortcuts: vec![
                Shortcut {
                    label: s("按住语音识别"),
                    en: s("Hold to speak"),
                    keys: vec![s("Win"), s("Ctrl")],
                },
                Shortcut {
                    label: s("显示/隐藏界面"),
                    en: s("Toggle UI"),
                    keys: vec![s("Win"), s("Alt")],
                },
            ],
            shortcut_tip: s("界面显示『按住快捷键说话』时即可识别，第一次加载 AI 模型可能会有数秒延迟，随后即进入毫秒态。"),
            footer_desc: s("这是我人生中第一个开发的软件，我会持续迭代，带给您更好的交流体验。"),
            works: vec![
                WorkLink {
                    title: s("从日本看中国"),
                    desc: s("每小时自动抓取日媒中国相关新闻聚合网"),
                },
                WorkLink {
                    title: s("Suno AI 音乐库"),
                    desc: s("@nakamotosai"),
                },
                WorkLink {
                    title: s("微信公众号"),
                    desc: s("假装在东京"),
                },
            ],
            contact_wechat: s("a16z88"),
            contact_email: s("sai@saaaai.com"),
            status: vec![
                StatusBadge {
                    label: s("Windows v1.0"),
                    active: true,
                },
                StatusBadge {
                    label: s("macOS Coming Soon"),
                    active: false,
                },
            ],
            copyright: s("© 2025 CNJP Input. Crafted with passion by 中本蔡."),
        }
    }
}
