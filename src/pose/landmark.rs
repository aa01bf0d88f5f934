use serde::{Deserialize, Serialize};

/// 33点ボディモデルのランドマークインデックス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum LandmarkIndex {
    Nose = 0,
    LeftEyeInner = 1,
    LeftEye = 2,
    LeftEyeOuter = 3,
    RightEyeInner = 4,
    RightEye = 5,
    RightEyeOuter = 6,
    LeftEar = 7,
    RightEar = 8,
    MouthLeft = 9,
    MouthRight = 10,
    LeftShoulder = 11,
    RightShoulder = 12,
    LeftElbow = 13,
    RightElbow = 14,
    LeftWrist = 15,
    RightWrist = 16,
    LeftPinky = 17,
    RightPinky = 18,
    LeftIndex = 19,
    RightIndex = 20,
    LeftThumb = 21,
    RightThumb = 22,
    LeftHip = 23,
    RightHip = 24,
    LeftKnee = 25,
    RightKnee = 26,
    LeftAnkle = 27,
    RightAnkle = 28,
    LeftHeel = 29,
    RightHeel = 30,
    LeftFootIndex = 31,
    RightFootIndex = 32,
}

impl LandmarkIndex {
    pub const COUNT: usize = 33;

    const ALL: [LandmarkIndex; Self::COUNT] = [
        Self::Nose,
        Self::LeftEyeInner,
        Self::LeftEye,
        Self::LeftEyeOuter,
        Self::RightEyeInner,
        Self::RightEye,
        Self::RightEyeOuter,
        Self::LeftEar,
        Self::RightEar,
        Self::MouthLeft,
        Self::MouthRight,
        Self::LeftShoulder,
        Self::RightShoulder,
        Self::LeftElbow,
        Self::RightElbow,
        Self::LeftWrist,
        Self::RightWrist,
        Self::LeftPinky,
        Self::RightPinky,
        Self::LeftIndex,
        Self::RightIndex,
        Self::LeftThumb,
        Self::RightThumb,
        Self::LeftHip,
        Self::RightHip,
        Self::LeftKnee,
        Self::RightKnee,
        Self::LeftAnkle,
        Self::RightAnkle,
        Self::LeftHeel,
        Self::RightHeel,
        Self::LeftFootIndex,
        Self::RightFootIndex,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// 単一ランドマーク
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Landmark {
    /// 正規化されたX座標 (0.0〜1.0)
    pub x: f64,
    /// 正規化されたY座標 (0.0〜1.0, 下方向が正)
    pub y: f64,
    /// 腰中心を基準とした相対深度
    #[serde(default)]
    pub z: f64,
}

impl Landmark {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// 2点の中点
    pub fn midpoint(&self, other: &Landmark) -> Landmark {
        Landmark::new(
            (self.x + other.x) / 2.0,
            (self.y + other.y) / 2.0,
            (self.z + other.z) / 2.0,
        )
    }
}

/// 姿勢推定パイプラインから届く生フレーム
///
/// ランドマーク数は検証前なので可変長。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoseFrame {
    pub landmarks: Vec<Landmark>,
    pub timestamp_ms: u64,
    /// フレーム全体の検出信頼度 (0.0〜1.0)
    pub confidence: f64,
}

impl PoseFrame {
    pub fn new(landmarks: Vec<Landmark>, timestamp_ms: u64, confidence: f64) -> Self {
        Self {
            landmarks,
            timestamp_ms,
            confidence,
        }
    }
}

/// 33点が揃っていることが保証された姿勢
#[derive(Debug, Clone, PartialEq)]
pub struct Pose {
    pub landmarks: [Landmark; LandmarkIndex::COUNT],
    pub timestamp_ms: u64,
    pub confidence: f64,
}

impl Pose {
    pub fn new(
        landmarks: [Landmark; LandmarkIndex::COUNT],
        timestamp_ms: u64,
        confidence: f64,
    ) -> Self {
        Self {
            landmarks,
            timestamp_ms,
            confidence,
        }
    }

    /// インデックスでランドマークを取得
    pub fn get(&self, index: LandmarkIndex) -> &Landmark {
        &self.landmarks[index as usize]
    }

    /// 左右ヒップの中点
    pub fn hip_center(&self) -> Landmark {
        self.get(LandmarkIndex::LeftHip)
            .midpoint(self.get(LandmarkIndex::RightHip))
    }

    /// 左右肩の中点
    pub fn shoulder_center(&self) -> Landmark {
        self.get(LandmarkIndex::LeftShoulder)
            .midpoint(self.get(LandmarkIndex::RightShoulder))
    }
}

impl TryFrom<PoseFrame> for Pose {
    /// 変換できなかった場合は実際のランドマーク数を返す
    type Error = usize;

    fn try_from(frame: PoseFrame) -> Result<Self, Self::Error> {
        let count = frame.landmarks.len();
        let landmarks: [Landmark; LandmarkIndex::COUNT] =
            frame.landmarks.try_into().map_err(|_| count)?;
        Ok(Pose::new(landmarks, frame.timestamp_ms, frame.confidence))
    }
}
