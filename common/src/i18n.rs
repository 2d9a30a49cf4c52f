//! 表示文字列テーブル（英語・スペイン語）

use crate::types::{Language, UiError};

/// 言語ごとの表示文字列
#[derive(Debug)]
pub struct UiText {
    pub system_online: &'static str,
    pub init_project: &'static str,
    pub release_upload: &'static str,
    pub drag_drop: &'static str,
    pub supported_formats: &'static str,
    pub access_drive: &'static str,
    pub incoming_stream: &'static str,
    pub system_standby: &'static str,
    pub next_gen_arch: &'static str,
    pub future_proof: &'static str,
    pub your_shelter: &'static str,
    pub hero_desc: &'static str,
    pub material_select: &'static str,
    pub color_grade: &'static str,
    pub initiate_render: &'static str,
    pub reset_system: &'static str,
    pub ai_consultant: &'static str,
    pub analyzing: &'static str,
    pub awaiting_select: &'static str,
    pub original: &'static str,
    pub render: &'static str,
    pub export: &'static str,
    pub processing: &'static str,
    pub physics: &'static str,
    pub resolving: &'static str,
    pub analysis_log: &'static str,
    pub arch_style: &'static str,
    pub mat_matrix: &'static str,
    pub ai_reasoning: &'static str,
    pub scanning: &'static str,
    pub voice_on: &'static str,
    pub voice_muted: &'static str,
    pub api_key: &'static str,
    pub invalid_file: &'static str,
    pub file_too_large: &'static str,
    pub error: &'static str,
    pub error_analysis: &'static str,
}

pub const UI_TEXT_EN: UiText = UiText {
    system_online: "SYSTEM ONLINE",
    init_project: "Initialize Project",
    release_upload: "Release to Upload",
    drag_drop: "DRAG SATELLITE IMAGERY OR BLUEPRINTS HERE",
    supported_formats: "SUPPORTED PROTOCOLS: JPG, PNG // MAX SIZE: 25MB",
    access_drive: "Access Local Drive",
    incoming_stream: "INCOMING DATA STREAM DETECTED",
    system_standby: "SYSTEM STANDBY // AWAITING INPUT",
    next_gen_arch: "Next Gen Architecture",
    future_proof: "Future Proof",
    your_shelter: "Your Shelter",
    hero_desc: "Deploy advanced neural networks to simulate premium roofing materials. Upload schematic data below to initiate simulation.",
    material_select: "Material Selection",
    color_grade: "Color Grade",
    initiate_render: "INITIATE RENDER SEQUENCE",
    reset_system: "RESET SYSTEM",
    ai_consultant: "AI Consultant",
    analyzing: "ANALYZING AESTHETICS...",
    awaiting_select: "AWAITING MATERIAL SELECTION...",
    original: "Original",
    render: "Render",
    export: "Export Data",
    processing: "PROCESSING ARCHITECTURE",
    physics: "APPLYING MATERIAL PHYSICS...",
    resolving: "RESOLVING",
    analysis_log: "Analysis Log",
    arch_style: "Architectural Style",
    mat_matrix: "Material Matrix",
    ai_reasoning: "AI Reasoning",
    scanning: "SCANNING STRUCTURE...",
    voice_on: "VOICE ON",
    voice_muted: "MUTED",
    api_key: "Gemini API Key",
    invalid_file: "Please upload an image file",
    file_too_large: "The image exceeds the 25MB limit",
    error: "Failed to generate visualization. System overload or content rejection.",
    error_analysis: "Failed to analyze image. Please try a different photo.",
};

pub const UI_TEXT_ES: UiText = UiText {
    system_online: "SISTEMA EN LÍNEA",
    init_project: "Inicializar Proyecto",
    release_upload: "Soltar para Subir",
    drag_drop: "ARRASTRE IMÁGENES SATELITALES O PLANOS AQUÍ",
    supported_formats: "PROTOCOLOS SOPORTADOS: JPG, PNG // TAMAÑO MÁX: 25MB",
    access_drive: "Acceder a Disco Local",
    incoming_stream: "FLUJO DE DATOS ENTRANTE DETECTADO",
    system_standby: "SISTEMA EN ESPERA // ESPERANDO ENTRADA",
    next_gen_arch: "Arquitectura de Próxima Generación",
    future_proof: "Proteja Su",
    your_shelter: "Refugio",
    hero_desc: "Despliegue redes neuronales avanzadas para simular materiales de techo premium. Suba datos esquemáticos abajo para iniciar.",
    material_select: "Selección de Material",
    color_grade: "Grado de Color",
    initiate_render: "INICIAR SECUENCIA DE RENDERIZADO",
    reset_system: "REINICIAR SISTEMA",
    ai_consultant: "Consultor IA",
    analyzing: "ANALIZANDO ESTÉTICA...",
    awaiting_select: "ESPERANDO SELECCIÓN DE MATERIAL...",
    original: "Original",
    render: "Render",
    export: "Exportar Datos",
    processing: "PROCESANDO ARQUITECTURA",
    physics: "APLICANDO FÍSICA DE MATERIALES...",
    resolving: "RESOLVIENDO",
    analysis_log: "Registro de Análisis",
    arch_style: "Estilo Arquitectónico",
    mat_matrix: "Matriz de Materiales",
    ai_reasoning: "Razonamiento IA",
    scanning: "ESCANEA ESTRUCTURA...",
    voice_on: "VOZ ACTIVA",
    voice_muted: "SILENCIO",
    api_key: "Clave API de Gemini",
    invalid_file: "Por favor suba un archivo de imagen",
    file_too_large: "La imagen excede el límite de 25MB",
    error: "Fallo al generar visualización. Sobrecarga del sistema o rechazo de contenido.",
    error_analysis: "Fallo al analizar la imagen. Por favor intente con otra foto.",
};

pub fn ui_text(language: Language) -> &'static UiText {
    match language {
        Language::En => &UI_TEXT_EN,
        Language::Es => &UI_TEXT_ES,
    }
}

impl UiText {
    /// エラーバナーの文言
    pub fn error_message(&self, error: UiError) -> &'static str {
        match error {
            UiError::Analysis => self.error_analysis,
            UiError::Generation => self.error,
        }
    }

    pub fn voice_label(&self, enabled: bool) -> &'static str {
        if enabled {
            self.voice_on
        } else {
            self.voice_muted
        }
    }
}
